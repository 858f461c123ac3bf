pub mod api_keys;
pub mod article_categories;
pub mod article_tags;
pub mod article_translations;
pub mod articles;
pub mod blogs;
pub mod brand_categories;
pub mod brands;
pub mod carousels;
pub mod categories;
pub mod category_translations;
pub mod files;
pub mod languages;
pub mod pages;
pub mod product_categories;
pub mod product_media;
pub mod products;
pub mod roles;
pub mod settings;
pub mod tag_translations;
pub mod tags;
pub mod user_roles;
pub mod users;

pub use api_keys::Entity as ApiKeys;
pub use article_categories::Entity as ArticleCategories;
pub use article_tags::Entity as ArticleTags;
pub use article_translations::Entity as ArticleTranslations;
pub use articles::Entity as Articles;
pub use blogs::Entity as Blogs;
pub use brand_categories::Entity as BrandCategories;
pub use brands::Entity as Brands;
pub use carousels::Entity as Carousels;
pub use categories::Entity as Categories;
pub use category_translations::Entity as CategoryTranslations;
pub use files::Entity as Files;
pub use languages::Entity as Languages;
pub use pages::Entity as Pages;
pub use product_categories::Entity as ProductCategories;
pub use product_media::Entity as ProductMedia;
pub use products::Entity as Products;
pub use roles::Entity as Roles;
pub use settings::Entity as Settings;
pub use tag_translations::Entity as TagTranslations;
pub use tags::Entity as Tags;
pub use user_roles::Entity as UserRoles;
pub use users::Entity as Users;
