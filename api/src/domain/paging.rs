/// A zero-based page window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: u32,
    pub size: u32,
}

impl PageRequest {
    /// Clients send one-based page numbers; zero, negatives and absent
    /// values all select the first page.
    pub fn from_client_page(page: Option<i64>, size: u32) -> Self {
        let index = match page {
            Some(p) if p >= 1 => u32::try_from(p - 1).unwrap_or(u32::MAX),
            _ => 0,
        };
        Self { index, size }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.index) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// Applies the window to an already ordered vector.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        items
            .into_iter()
            .skip(offset)
            .take(self.size as usize)
            .collect()
    }
}
