pub use super::search_terms::Entity as SearchTerms;
