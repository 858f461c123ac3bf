pub mod db;
pub mod entities;
mod repo;
pub mod storage;

pub use repo::{
    ArticlePatch, BlogPatch, BrandPatch, NewApiKey, NewArticle, NewArticleTranslation, NewBlog,
    NewBrand, NewCarousel, NewCategory, NewCategoryTranslation, NewFile, NewLanguage, NewPage,
    NewProduct, NewProductCategory, NewProductMedia, NewTag, NewTagTranslation, NewUser, PagePatch,
    ProductPatch, RoleSeed,
};
pub use sea_orm;
pub use storage::{CmsStorage, StorageError, StorageResult};
