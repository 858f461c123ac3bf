mod api_keys;
mod carousels;
mod catalog;
mod content;
mod files;
mod languages;
mod pages;
mod settings;
mod users;

pub use api_keys::NewApiKey;
pub use carousels::NewCarousel;
pub use catalog::{
    BrandPatch, NewBrand, NewProduct, NewProductCategory, NewProductMedia, ProductPatch,
};
pub use content::{
    ArticlePatch, BlogPatch, NewArticle, NewArticleTranslation, NewBlog, NewCategory,
    NewCategoryTranslation, NewTag, NewTagTranslation,
};
pub use files::NewFile;
pub use languages::NewLanguage;
pub use pages::{NewPage, PagePatch};
pub use users::{NewUser, RoleSeed};
