pub mod api_keys;
pub mod auth;
pub mod blogs;
pub mod carousels;
pub mod catalog;
pub mod content;
pub mod languages;
pub mod pages;
pub mod uploads;
pub mod users;

pub use api_keys::{ApiKeyService, AuthedRequest, CreatedApiKey};
pub use auth::{AuthService, LoginOutcome};
pub use blogs::BlogService;
pub use carousels::CarouselService;
pub use catalog::{
    BrandUpdateInput, BrandView, CatalogService, NewBrandInput, NewProductInput, effective_price,
    in_stock,
};
pub use content::{ArticleView, CategoryView, ContentService, TagView, TranslationInput};
pub use languages::LanguageService;
pub use pages::{MenuNode, NewPageInput, PageService, PageUpdateInput};
pub use uploads::{UploadInput, UploadService};
pub use users::{UserService, UserView, default_roles};
