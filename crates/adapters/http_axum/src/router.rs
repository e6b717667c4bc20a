//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` next to a plain `/health` check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<AR, UR, SR, CR, LR, KR>(state: AppState<AR, UR, SR, CR, LR, KR>) -> Router
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{USER_ID_HEADER, USER_ROLE_HEADER};
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use estore_app::services::address_service::AddressService;
    use estore_app::services::category_service::CategoryService;
    use estore_app::services::geo_service::GeoService;
    use estore_app::services::user_service::UserService;
    use estore_domain::address::Address;
    use estore_domain::category::Category;
    use estore_domain::error::EstoreError;
    use estore_domain::geo::{City, Locality, LocalityPath, State};
    use estore_domain::id::{AddressId, CategoryId, CityId, LocalityId, StateId, UserId};
    use estore_domain::user::User;
    use tower::ServiceExt;

    struct StubAddressRepo;
    struct StubUserRepo;
    struct StubStateRepo;
    struct StubCityRepo;
    struct StubLocalityRepo;
    struct StubCategoryRepo;

    impl AddressRepository for StubAddressRepo {
        async fn create(&self, address: Address) -> Result<Address, EstoreError> {
            Ok(address)
        }
        async fn get_by_id(&self, _id: AddressId) -> Result<Option<Address>, EstoreError> {
            Ok(None)
        }
        async fn find_by_user(&self, _user_id: UserId) -> Result<Vec<Address>, EstoreError> {
            Ok(vec![])
        }
        async fn find_default_by_user(
            &self,
            _user_id: UserId,
        ) -> Result<Option<Address>, EstoreError> {
            Ok(None)
        }
        async fn count_by_user(&self, _user_id: UserId) -> Result<usize, EstoreError> {
            Ok(0)
        }
        async fn update(&self, address: Address) -> Result<Address, EstoreError> {
            Ok(address)
        }
        async fn delete(&self, _id: AddressId) -> Result<Option<Address>, EstoreError> {
            Ok(None)
        }
    }

    impl UserRepository for StubUserRepo {
        async fn create(&self, user: User) -> Result<User, EstoreError> {
            Ok(user)
        }
        async fn get_by_id(&self, _id: UserId) -> Result<Option<User>, EstoreError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<User>, EstoreError> {
            Ok(vec![])
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, EstoreError> {
            Ok(None)
        }
    }

    impl StateRepository for StubStateRepo {
        async fn create(&self, state: State) -> Result<State, EstoreError> {
            Ok(state)
        }
        async fn get_by_id(&self, _id: StateId) -> Result<Option<State>, EstoreError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<State>, EstoreError> {
            Ok(vec![])
        }
        async fn find_by_name(&self, _name: &str) -> Result<Option<State>, EstoreError> {
            Ok(None)
        }
        async fn find_by_code(&self, _code: &str) -> Result<Option<State>, EstoreError> {
            Ok(None)
        }
    }

    impl CityRepository for StubCityRepo {
        async fn create(&self, city: City) -> Result<City, EstoreError> {
            Ok(city)
        }
        async fn get_by_id(&self, _id: CityId) -> Result<Option<City>, EstoreError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<City>, EstoreError> {
            Ok(vec![])
        }
        async fn find_by_state(&self, _state_id: StateId) -> Result<Vec<City>, EstoreError> {
            Ok(vec![])
        }
    }

    impl LocalityRepository for StubLocalityRepo {
        async fn create(&self, locality: Locality) -> Result<Locality, EstoreError> {
            Ok(locality)
        }
        async fn get_by_id(&self, _id: LocalityId) -> Result<Option<Locality>, EstoreError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Locality>, EstoreError> {
            Ok(vec![])
        }
        async fn find_by_city(&self, _city_id: CityId) -> Result<Vec<Locality>, EstoreError> {
            Ok(vec![])
        }
        async fn get_path(&self, _id: LocalityId) -> Result<Option<LocalityPath>, EstoreError> {
            Ok(None)
        }
    }

    impl CategoryRepository for StubCategoryRepo {
        async fn create(&self, category: Category) -> Result<Category, EstoreError> {
            Ok(category)
        }
        async fn get_by_id(&self, _id: CategoryId) -> Result<Option<Category>, EstoreError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Category>, EstoreError> {
            Ok(vec![])
        }
        async fn find_children(&self, _parent: CategoryId) -> Result<Vec<Category>, EstoreError> {
            Ok(vec![])
        }
        async fn find_ancestors(&self, _id: CategoryId) -> Result<Vec<CategoryId>, EstoreError> {
            Ok(vec![])
        }
        async fn update(&self, category: Category) -> Result<Category, EstoreError> {
            Ok(category)
        }
        async fn delete(&self, _id: CategoryId) -> Result<bool, EstoreError> {
            Ok(false)
        }
    }

    type StubState = AppState<
        StubAddressRepo,
        StubUserRepo,
        StubStateRepo,
        StubCityRepo,
        StubLocalityRepo,
        StubCategoryRepo,
    >;

    fn test_state() -> StubState {
        AppState::new(
            AddressService::new(StubAddressRepo, StubUserRepo, StubLocalityRepo),
            GeoService::new(StubStateRepo, StubCityRepo, StubLocalityRepo),
            CategoryService::new(StubCategoryRepo),
            UserService::new(StubUserRepo),
        )
    }

    async fn send(request: Request<Body>) -> StatusCode {
        build(test_state()).oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let status = send(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_states_for_anonymous_caller() {
        let status = send(
            Request::builder()
                .uri("/api/states")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_forbid_state_creation_by_customer() {
        let status = send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/states")
                .header("content-type", "application/json")
                .header(USER_ID_HEADER, UserId::new().to_string())
                .header(USER_ROLE_HEADER, "customer")
                .body(Body::from(r#"{"name":"Karnataka","code":"KA"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_create_state_when_caller_is_admin() {
        let status = send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/states")
                .header("content-type", "application/json")
                .header(USER_ID_HEADER, UserId::new().to_string())
                .header(USER_ROLE_HEADER, "admin")
                .body(Body::from(r#"{"name":"Karnataka","code":"KA"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_path_id_malformed() {
        let status = send(
            Request::builder()
                .uri("/api/users/not-a-uuid/addresses")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_for_addresses_of_unknown_user() {
        let user_id = UserId::new();
        let status = send(
            Request::builder()
                .uri(format!("/api/users/{user_id}/addresses/default"))
                .header(USER_ID_HEADER, user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_address() {
        let user_id = UserId::new();
        let status = send(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/users/{user_id}/addresses/{}", AddressId::new()))
                .header(USER_ID_HEADER, user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_forbid_foreign_customer_before_looking_up_address() {
        let status = send(
            Request::builder()
                .uri(format!("/api/users/{}/addresses/{}", UserId::new(), AddressId::new()))
                .header(USER_ID_HEADER, UserId::new().to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_forbid_anonymous_address_update() {
        let status = send(
            Request::builder()
                .method(Method::PUT)
                .uri(format!(
                    "/api/users/{}/addresses/{}/default",
                    UserId::new(),
                    AddressId::new()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_list_categories_for_anonymous_caller() {
        let status = send(
            Request::builder()
                .uri("/api/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_create_category_when_caller_is_admin() {
        let status = send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/categories")
                .header("content-type", "application/json")
                .header(USER_ID_HEADER, UserId::new().to_string())
                .header(USER_ROLE_HEADER, "admin")
                .body(Body::from(r#"{"name":"Laptops"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn should_forbid_category_creation_by_customer() {
        let status = send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/categories")
                .header("content-type", "application/json")
                .header(USER_ID_HEADER, UserId::new().to_string())
                .body(Body::from(r#"{"name":"Laptops"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_category_status_change() {
        let status = send(
            Request::builder()
                .method(Method::PUT)
                .uri(format!("/api/categories/{}/status", CategoryId::new()))
                .header("content-type", "application/json")
                .header(USER_ID_HEADER, UserId::new().to_string())
                .header(USER_ROLE_HEADER, "admin")
                .body(Body::from(r#"{"status":"INACTIVE"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_category_id_malformed() {
        let status = send(
            Request::builder()
                .uri("/api/categories/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
