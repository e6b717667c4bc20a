//! `SQLite` implementation of [`AddressRepository`].
//!
//! Every write touching `is_default` runs in one transaction: the other
//! defaults of the owner are cleared first, then the row is written. The
//! partial unique index `ux_addresses_default_per_user` backs this up, and
//! its violations surface as [`InvariantError::MultipleDefaults`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use estore_app::ports::AddressRepository;
use estore_domain::address::{Address, AddressType};
use estore_domain::error::{EstoreError, InvariantError};
use estore_domain::id::{AddressId, UserId};

use crate::decode;
use crate::error::{StorageError, is_unique_violation};

/// Wrapper for converting database rows into domain [`Address`].
struct Wrapper(Address);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Address> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let locality_id: String = row.try_get("locality_id")?;
        let address_type: String = row.try_get("address_type")?;
        let created_at: String = row.try_get("created_at")?;

        let address_type =
            AddressType::parse(&address_type).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "address_type".to_string(),
                source: format!("unknown address type '{address_type}'").into(),
            })?;

        Ok(Self(Address {
            id: decode::id(&id)?,
            user_id: decode::id(&user_id)?,
            locality_id: decode::id(&locality_id)?,
            address_line1: row.try_get("address_line1")?,
            address_line2: row.try_get("address_line2")?,
            landmark: row.try_get("landmark")?,
            contact_name: row.try_get("contact_name")?,
            contact_phone: row.try_get("contact_phone")?,
            address_type,
            is_default: row.try_get("is_default")?,
            created_at: decode::timestamp(&created_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO addresses \
     (id, user_id, locality_id, address_line1, address_line2, landmark, \
      contact_name, contact_phone, address_type, is_default, created_at) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM addresses WHERE id = ?";
const SELECT_BY_USER: &str =
    "SELECT * FROM addresses WHERE user_id = ? ORDER BY created_at, rowid";
const SELECT_DEFAULT_BY_USER: &str =
    "SELECT * FROM addresses WHERE user_id = ? AND is_default = 1";
const SELECT_OLDEST_BY_USER: &str =
    "SELECT * FROM addresses WHERE user_id = ? ORDER BY created_at, rowid LIMIT 1";
const COUNT_BY_USER: &str = "SELECT COUNT(*) FROM addresses WHERE user_id = ?";
const CLEAR_OTHER_DEFAULTS: &str =
    "UPDATE addresses SET is_default = 0 WHERE user_id = ? AND id <> ? AND is_default = 1";
const UPDATE: &str = "UPDATE addresses SET \
     locality_id = ?, address_line1 = ?, address_line2 = ?, landmark = ?, \
     contact_name = ?, contact_phone = ?, address_type = ?, is_default = ? \
     WHERE id = ?";
const SET_DEFAULT: &str = "UPDATE addresses SET is_default = 1 WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM addresses WHERE id = ?";

/// Map a failed write, turning a default-index rejection into an invariant error.
fn write_error(user_id: UserId, err: sqlx::Error) -> EstoreError {
    if is_unique_violation(&err) {
        InvariantError::MultipleDefaults(user_id).into()
    } else {
        StorageError::from(err).into()
    }
}

/// `SQLite`-backed address repository.
pub struct SqliteAddressRepository {
    pool: SqlitePool,
}

impl SqliteAddressRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AddressRepository for SqliteAddressRepository {
    fn create(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<Address, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            if address.is_default {
                sqlx::query(CLEAR_OTHER_DEFAULTS)
                    .bind(address.user_id.to_string())
                    .bind(address.id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }

            sqlx::query(INSERT)
                .bind(address.id.to_string())
                .bind(address.user_id.to_string())
                .bind(address.locality_id.to_string())
                .bind(&address.address_line1)
                .bind(&address.address_line2)
                .bind(&address.landmark)
                .bind(&address.contact_name)
                .bind(&address.contact_phone)
                .bind(address.address_type.as_str())
                .bind(address.is_default)
                .bind(decode::encode_timestamp(address.created_at))
                .execute(&mut *tx)
                .await
                .map_err(|err| write_error(address.user_id, err))?;

            tx.commit().await.map_err(StorageError::from)?;

            Ok(address)
        }
    }

    fn get_by_id(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<Address>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Address>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_default_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Address>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_DEFAULT_BY_USER)
                .bind(user_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<usize, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT_BY_USER)
                .bind(user_id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            let count = usize::try_from(count)
                .map_err(|err| StorageError::from(sqlx::Error::Decode(Box::new(err))))?;
            Ok(count)
        }
    }

    fn update(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<Address, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            if address.is_default {
                sqlx::query(CLEAR_OTHER_DEFAULTS)
                    .bind(address.user_id.to_string())
                    .bind(address.id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }

            sqlx::query(UPDATE)
                .bind(address.locality_id.to_string())
                .bind(&address.address_line1)
                .bind(&address.address_line2)
                .bind(&address.landmark)
                .bind(&address.contact_name)
                .bind(&address.contact_phone)
                .bind(address.address_type.as_str())
                .bind(address.is_default)
                .bind(address.id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|err| write_error(address.user_id, err))?;

            tx.commit().await.map_err(StorageError::from)?;

            Ok(address)
        }
    }

    fn delete(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<Address>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let removed: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let Some(Wrapper(removed)) = removed else {
                return Ok(None);
            };

            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            let mut promoted = None;
            if removed.is_default {
                let oldest: Option<Wrapper> = sqlx::query_as(SELECT_OLDEST_BY_USER)
                    .bind(removed.user_id.to_string())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
                if let Some(Wrapper(mut next)) = oldest {
                    sqlx::query(SET_DEFAULT)
                        .bind(next.id.to_string())
                        .execute(&mut *tx)
                        .await
                        .map_err(|err| write_error(removed.user_id, err))?;
                    next.is_default = true;
                    promoted = Some(next);
                }
            }

            tx.commit().await.map_err(StorageError::from)?;

            Ok(promoted)
        }
    }
}
