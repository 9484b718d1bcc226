//! Search parameter normalisation and the paginated result envelope.
//!
//! Raw pagination/sort/filter values arrive untyped from query strings or
//! JSON bodies. [`SearchParams::new`] turns any combination of them into a
//! canonical, always-valid parameter set. It never fails: unusable values
//! fall back to the field default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page used when the requested page is missing or unusable.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the requested size is missing or unusable.
pub const DEFAULT_PER_PAGE: u64 = 15;

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Entity-specific filter value carried by [`SearchParams`].
///
/// `Raw` is what the boundary hands over; `normalize` maps it to the filter
/// or to `None` (match everything).
pub trait SearchFilter: Sized + Clone + Send + Sync {
    type Raw;

    fn normalize(raw: Self::Raw) -> Option<Self>;
}

/// Free-text filters accept any scalar and stringify it. Empty strings and
/// `null` mean "no filter".
impl SearchFilter for String {
    type Raw = Value;

    fn normalize(raw: Value) -> Option<Self> {
        stringify(&raw)
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Unnormalised search request as received from the outside.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct SearchInput<R> {
    #[serde(default)]
    pub page: Option<Value>,
    #[serde(default)]
    pub per_page: Option<Value>,
    #[serde(default)]
    pub sort: Option<Value>,
    #[serde(default)]
    pub sort_dir: Option<Value>,
    #[serde(default)]
    pub filter: Option<R>,
}

impl<R> Default for SearchInput<R> {
    fn default() -> Self {
        Self {
            page: None,
            per_page: None,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

impl<R> SearchInput<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: impl Into<Value>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn per_page(mut self, per_page: impl Into<Value>) -> Self {
        self.per_page = Some(per_page.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn sort_dir(mut self, sort_dir: impl Into<Value>) -> Self {
        self.sort_dir = Some(sort_dir.into());
        self
    }

    pub fn filter(mut self, filter: R) -> Self {
        self.filter = Some(filter);
        self
    }
}

// ---------------------------------------------------------------------------
// Normalised params
// ---------------------------------------------------------------------------

/// Canonical pagination/sort/filter request.
///
/// Invariants: `page >= 1`, `per_page >= 1`, `sort_dir` is `Some` iff `sort`
/// is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams<F> {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<F>,
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

impl<F: SearchFilter> SearchParams<F> {
    pub fn new(input: SearchInput<F::Raw>) -> Self {
        let sort = normalize_sort(input.sort.as_ref());
        let sort_dir = normalize_sort_dir(sort.as_deref(), input.sort_dir.as_ref());
        Self {
            page: normalize_page(input.page.as_ref()),
            per_page: normalize_per_page(input.per_page.as_ref()),
            sort,
            sort_dir,
            filter: input.filter.and_then(F::normalize),
        }
    }
}

impl<F> SearchParams<F> {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }

    /// Zero-based index of the first item on the requested page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Coerce to a positive integer, else [`DEFAULT_PAGE`].
pub fn normalize_page(raw: Option<&Value>) -> u64 {
    positive_or(raw, DEFAULT_PAGE)
}

/// Coerce to a positive integer, else [`DEFAULT_PER_PAGE`].
pub fn normalize_per_page(raw: Option<&Value>) -> u64 {
    positive_or(raw, DEFAULT_PER_PAGE)
}

/// Empty or absent sort means no sort; anything else is stringified.
pub fn normalize_sort(raw: Option<&Value>) -> Option<String> {
    raw.and_then(stringify)
}

/// `Desc` only for a case-insensitive `"desc"`; every other value is `Asc`.
/// Always `None` when there is no sort field.
pub fn normalize_sort_dir(sort: Option<&str>, raw: Option<&Value>) -> Option<SortDirection> {
    sort?;
    let is_desc = raw
        .and_then(stringify)
        .is_some_and(|dir| dir.eq_ignore_ascii_case("desc"));
    Some(if is_desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    })
}

/// Scalar-to-string coercion shared by sort and free-text filters.
/// `null` and `""` yield `None`.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn positive_or(raw: Option<&Value>, default: u64) -> u64 {
    match raw.and_then(coerce_int) {
        Some(n) if n > 0 => n as u64,
        _ => default,
    }
}

/// Integer coercion: integers pass, floats truncate toward zero, booleans
/// count as 0/1, strings must hold an integer literal. Out-of-range values
/// saturate. Everything else is not coercible.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => parse_int_literal(s.trim()),
        _ => None,
    }
}

/// Optional sign followed by ASCII digits only.
fn parse_int_literal(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

// ---------------------------------------------------------------------------
// Result envelope
// ---------------------------------------------------------------------------

/// One page of search results plus derived pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<T> {
    pub items: Vec<T>,
    /// Number of matches before pagination.
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    /// `ceil(total / per_page)`; `0` when nothing matched.
    pub last_page: u64,
}

impl<T> SearchResult<T> {
    pub fn new(items: Vec<T>, total: u64, current_page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            current_page,
            per_page,
            last_page: last_page(total, per_page),
        }
    }

    /// Convert every item, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchResult<U> {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
        }
    }
}

fn last_page(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    type Params = SearchParams<String>;

    fn with_page(page: Value) -> Params {
        Params::new(SearchInput::new().page(page))
    }

    fn with_per_page(per_page: Value) -> Params {
        Params::new(SearchInput::new().per_page(per_page))
    }

    // -- defaults ------------------------------------------------------------

    #[test]
    fn defaults() {
        let params = Params::new(SearchInput::new());
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 15);
        assert_eq!(params.sort(), None);
        assert_eq!(params.sort_dir(), None);
        assert_eq!(params.filter(), None);
        assert_eq!(params, Params::default());
    }

    // -- page ----------------------------------------------------------------

    #[test]
    fn page_falls_back_to_one_for_unusable_values() {
        let cases = [
            json!(null),
            json!(""),
            json!("fake"),
            json!(0),
            json!(-1),
            json!("0"),
            json!("-1"),
            json!("5.5"),
            json!(true),
            json!(false),
            json!({}),
            json!([]),
        ];
        for raw in cases {
            assert_eq!(with_page(raw.clone()).page(), 1, "raw {raw}");
        }
    }

    #[test]
    fn page_keeps_positive_integers() {
        assert_eq!(with_page(json!(1)).page(), 1);
        assert_eq!(with_page(json!(2)).page(), 2);
        assert_eq!(with_page(json!("3")).page(), 3);
        assert_eq!(with_page(json!(" 4 ")).page(), 4);
        assert_eq!(with_page(json!("+6")).page(), 6);
    }

    #[test]
    fn page_saturates_oversized_integers() {
        let max = i64::MAX as u64;
        assert_eq!(with_page(json!("99999999999999999999")).page(), max);
        assert_eq!(with_page(json!(u64::MAX)).page(), max);
        assert_eq!(with_page(json!("-99999999999999999999")).page(), 1);

        let params = Params::new(SearchInput::new().per_page(json!("99999999999999999999")));
        assert_eq!(params.per_page(), max);
    }

    #[test]
    fn page_truncates_fractions() {
        assert_eq!(with_page(json!(5.5)).page(), 5);
        assert_eq!(with_page(json!(2.999)).page(), 2);
        assert_eq!(with_page(json!(0.5)).page(), 1);
    }

    // -- per_page ------------------------------------------------------------

    #[test]
    fn per_page_falls_back_to_fifteen_for_unusable_values() {
        let cases = [
            json!(null),
            json!(""),
            json!("fake"),
            json!(0),
            json!(-1),
            json!("0"),
            json!("-1"),
            json!(false),
            json!({}),
        ];
        for raw in cases {
            assert_eq!(with_per_page(raw.clone()).per_page(), 15, "raw {raw}");
        }
    }

    #[test]
    fn per_page_keeps_positive_integers() {
        assert_eq!(with_per_page(json!(1)).per_page(), 1);
        assert_eq!(with_per_page(json!(2)).per_page(), 2);
        assert_eq!(with_per_page(json!(true)).per_page(), 1);
        assert_eq!(with_per_page(json!(5.5)).per_page(), 5);
        assert_eq!(with_per_page(json!("20")).per_page(), 20);
    }

    // -- sort ----------------------------------------------------------------

    #[test]
    fn sort_normalisation() {
        let cases = [
            (json!(null), None),
            (json!(""), None),
            (json!("fake"), Some("fake")),
            (json!(0), Some("0")),
            (json!(-1), Some("-1")),
            (json!("0"), Some("0")),
            (json!(5.5), Some("5.5")),
            (json!(true), Some("true")),
            (json!({}), Some("{}")),
        ];
        for (raw, expected) in cases {
            let params = Params::new(SearchInput::new().sort(raw.clone()));
            assert_eq!(params.sort(), expected, "raw {raw}");
        }
    }

    // -- sort_dir ------------------------------------------------------------

    #[test]
    fn sort_dir_is_none_without_sort() {
        for raw in [json!("desc"), json!("asc"), json!(null)] {
            let params = Params::new(SearchInput::new().sort_dir(raw));
            assert_eq!(params.sort_dir(), None);
        }
        let params = Params::new(SearchInput::new().sort("").sort_dir("desc"));
        assert_eq!(params.sort_dir(), None);
    }

    #[test]
    fn sort_dir_defaults_to_asc_unless_desc() {
        let cases = [
            (json!(null), SortDirection::Asc),
            (json!(""), SortDirection::Asc),
            (json!("fake"), SortDirection::Asc),
            (json!("ascending"), SortDirection::Asc),
            (json!(0), SortDirection::Asc),
            (json!({}), SortDirection::Asc),
            (json!("asc"), SortDirection::Asc),
            (json!("ASC"), SortDirection::Asc),
            (json!("desc"), SortDirection::Desc),
            (json!("DESC"), SortDirection::Desc),
            (json!("DeSc"), SortDirection::Desc),
        ];
        for (raw, expected) in cases {
            let params = Params::new(SearchInput::new().sort("name").sort_dir(raw.clone()));
            assert_eq!(params.sort_dir(), Some(expected), "raw {raw}");
        }

        let params = Params::new(SearchInput::new().sort("name"));
        assert_eq!(params.sort_dir(), Some(SortDirection::Asc));
    }

    // -- filter --------------------------------------------------------------

    #[test]
    fn scalar_filter_normalisation() {
        let cases = [
            (json!(null), None),
            (json!(""), None),
            (json!("fake"), Some("fake")),
            (json!(0), Some("0")),
            (json!(-1), Some("-1")),
            (json!(5.5), Some("5.5")),
            (json!(false), Some("false")),
            (json!({}), Some("{}")),
        ];
        for (raw, expected) in cases {
            let params = Params::new(SearchInput::new().filter(raw.clone()));
            assert_eq!(params.filter().map(String::as_str), expected, "raw {raw}");
        }
    }

    // -- offset --------------------------------------------------------------

    #[test]
    fn offset_is_zero_based() {
        let params = Params::new(SearchInput::new().page(3).per_page(10));
        assert_eq!(params.offset(), 20);
        assert_eq!(Params::default().offset(), 0);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let params = Params::new(SearchInput::new().page(i64::MAX).per_page(i64::MAX));
        assert_eq!(params.offset(), u64::MAX);
    }

    // -- deserialisation -----------------------------------------------------

    #[test]
    fn search_input_deserializes_untyped_values() {
        let input: SearchInput<Value> = serde_json::from_value(json!({
            "page": "2",
            "per_page": 5,
            "sort": "name",
            "sort_dir": "DESC",
            "filter": "abc",
        }))
        .unwrap();
        let params = Params::new(input);
        assert_eq!(params.page(), 2);
        assert_eq!(params.per_page(), 5);
        assert_eq!(params.sort(), Some("name"));
        assert_eq!(params.sort_dir(), Some(SortDirection::Desc));
        assert_eq!(params.filter().map(String::as_str), Some("abc"));
    }

    // -- SearchResult --------------------------------------------------------

    #[test]
    fn last_page_is_ceiling_of_total_over_per_page() {
        let cases = [(17, 5, 4), (15, 5, 3), (16, 5, 4), (1, 15, 1), (0, 15, 0), (0, 1, 0)];
        for (total, per_page, expected) in cases {
            let result = SearchResult::<()>::new(vec![], total, 1, per_page);
            assert_eq!(result.last_page, expected, "total {total} per_page {per_page}");
        }
    }

    #[test]
    fn result_keeps_inputs() {
        let result = SearchResult::new(vec![1, 2, 3, 4, 5], 17, 2, 5);
        assert_eq!(result.items, [1, 2, 3, 4, 5]);
        assert_eq!(result.total, 17);
        assert_eq!(result.current_page, 2);
        assert_eq!(result.per_page, 5);
        assert_eq!(result.last_page, 4);
    }

    #[test]
    fn map_keeps_metadata() {
        let result = SearchResult::new(vec![1, 2], 4, 1, 2).map(|n| n * 10);
        assert_eq!(result.items, [10, 20]);
        assert_eq!(result.total, 4);
        assert_eq!(result.last_page, 2);
    }
}
