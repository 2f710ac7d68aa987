pub mod entities;
pub mod slugs;
pub mod use_cases;
