/// A single product entry lifted off the category page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: String,
    pub url: String,
    pub title: String,
    /// `None` when nothing near the anchor looked like a price
    pub price: Option<String>,
}
