//! Shared application state for axum handlers.

use std::sync::Arc;

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};
use estore_app::services::address_service::AddressService;
use estore_app::services::category_service::CategoryService;
use estore_app::services::geo_service::GeoService;
use estore_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the repositories themselves do not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<AR, UR, SR, CR, LR, KR> {
    /// Address use-cases and default-flag maintenance.
    pub address_service: Arc<AddressService<AR, UR, LR>>,
    /// State, city and locality catalogue.
    pub geo_service: Arc<GeoService<SR, CR, LR>>,
    /// Category tree maintenance.
    pub category_service: Arc<CategoryService<KR>>,
    /// User registration and lookup.
    pub user_service: Arc<UserService<UR>>,
}

impl<AR, UR, SR, CR, LR, KR> Clone for AppState<AR, UR, SR, CR, LR, KR> {
    fn clone(&self) -> Self {
        Self {
            address_service: Arc::clone(&self.address_service),
            geo_service: Arc::clone(&self.geo_service),
            category_service: Arc::clone(&self.category_service),
            user_service: Arc::clone(&self.user_service),
        }
    }
}

impl<AR, UR, SR, CR, LR, KR> AppState<AR, UR, SR, CR, LR, KR>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        address_service: AddressService<AR, UR, LR>,
        geo_service: GeoService<SR, CR, LR>,
        category_service: CategoryService<KR>,
        user_service: UserService<UR>,
    ) -> Self {
        Self {
            address_service: Arc::new(address_service),
            geo_service: Arc::new(geo_service),
            category_service: Arc::new(category_service),
            user_service: Arc::new(user_service),
        }
    }
}
