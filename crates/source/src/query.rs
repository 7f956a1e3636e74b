/// Largest page the results service will return.
pub const MAX_PAGE_SIZE: usize = 500;

/// One page request against the tournament results listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsQuery {
    pub limit: usize,
    pub offset: usize,
}
impl Default for ResultsQuery {
    fn default() -> Self {
        Self::page(0, MAX_PAGE_SIZE)
    }
}
impl ResultsQuery {
    pub fn page(offset: usize, limit: usize) -> Self {
        Self { limit, offset }
    }

    /// The same page size, starting at a different offset.
    pub fn at(&self, offset: usize) -> Self {
        Self { offset, ..*self }
    }

    /// Query string pairs.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![("limit", self.limit.to_string()), ("offset", self.offset.to_string())]
    }
}
