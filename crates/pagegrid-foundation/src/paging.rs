//! Page arithmetic.
//!
//! All page math is integer-only so page boundaries are deterministic.

/// Number of pages needed for `item_count` items, `capacity` per page.
pub fn total_page_count(item_count: usize, capacity: usize) -> usize {
    if item_count == 0 || capacity == 0 {
        return 0;
    }
    item_count.div_ceil(capacity)
}

/// Page holding the item at `index`.
pub fn page_index_from_item(index: usize, capacity: usize) -> usize {
    index / capacity
}

/// First item index of `page`.
pub fn first_index_of_page(page: usize, capacity: usize) -> usize {
    page * capacity
}

/// Page the viewport is closest to: rounds up once the remainder passes half
/// a page.
pub fn page_index_from_offset(offset: i32, extent: i32) -> usize {
    if offset <= 0 || extent <= 0 {
        return 0;
    }
    let mut page = offset / extent;
    if offset % extent > extent / 2 {
        page += 1;
    }
    page as usize
}

/// Page index that rounds up on any positive remainder. Used to record the
/// page a drag starts from, so a drag beginning mid-transition counts from
/// the page being approached.
pub fn strict_page_index_from_offset(offset: i32, extent: i32) -> usize {
    if offset <= 0 || extent <= 0 {
        return 0;
    }
    let mut page = offset / extent;
    if offset % extent > 0 {
        page += 1;
    }
    page as usize
}

/// Page arithmetic bound to a fixed page capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageArithmetic {
    capacity: usize,
}

impl PageArithmetic {
    /// `capacity` must be positive; the layout manager validates this when it
    /// is configured.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "page capacity must be positive");
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_page_count(&self, item_count: usize) -> usize {
        total_page_count(item_count, self.capacity)
    }

    pub fn page_index_from_item(&self, index: usize) -> usize {
        page_index_from_item(index, self.capacity)
    }

    pub fn first_index_of_page(&self, page: usize) -> usize {
        first_index_of_page(page, self.capacity)
    }

    /// Maximum scroll offset for `item_count` items with a page stride of
    /// `extent`.
    pub fn max_scroll(&self, item_count: usize, extent: i32) -> i32 {
        let pages = self.total_page_count(item_count);
        if pages == 0 || extent <= 0 {
            return 0;
        }
        ((pages - 1) as i32).saturating_mul(extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_integer_ceiling() {
        assert_eq!(total_page_count(0, 10), 0);
        assert_eq!(total_page_count(1, 10), 1);
        assert_eq!(total_page_count(10, 10), 1);
        assert_eq!(total_page_count(11, 10), 2);
        assert_eq!(total_page_count(25, 10), 3);
        assert_eq!(total_page_count(25, 5), 5);
    }

    #[test]
    fn page_count_matches_ceiling_for_many_inputs() {
        for capacity in 1..=12usize {
            for count in 0..=100usize {
                let expected = (count + capacity - 1) / capacity;
                assert_eq!(total_page_count(count, capacity), expected);
            }
        }
    }

    #[test]
    fn item_page_is_floor() {
        assert_eq!(page_index_from_item(23, 10), 2);
        assert_eq!(page_index_from_item(20, 10), 2);
        assert_eq!(page_index_from_item(19, 10), 1);
        assert_eq!(first_index_of_page(3, 5), 15);
    }

    #[test]
    fn nearest_page_rounds_past_midpoint() {
        assert_eq!(page_index_from_offset(0, 500), 0);
        assert_eq!(page_index_from_offset(250, 500), 0);
        assert_eq!(page_index_from_offset(251, 500), 1);
        assert_eq!(page_index_from_offset(999, 500), 2);
        assert_eq!(page_index_from_offset(1000, 500), 2);
        assert_eq!(page_index_from_offset(-40, 500), 0);
        assert_eq!(page_index_from_offset(300, 0), 0);
    }

    #[test]
    fn strict_page_rounds_on_any_remainder() {
        assert_eq!(strict_page_index_from_offset(0, 500), 0);
        assert_eq!(strict_page_index_from_offset(1, 500), 1);
        assert_eq!(strict_page_index_from_offset(500, 500), 1);
        assert_eq!(strict_page_index_from_offset(501, 500), 2);
        assert_eq!(strict_page_index_from_offset(501, 0), 0);
    }

    #[test]
    fn max_scroll_spans_all_but_last_page() {
        let pages = PageArithmetic::new(5);
        assert_eq!(pages.max_scroll(25, 500), 2000);
        assert_eq!(pages.max_scroll(3, 500), 0);
        assert_eq!(pages.max_scroll(0, 500), 0);
    }
}
