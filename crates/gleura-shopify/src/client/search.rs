//! Two-pass order search over the decorated and bare order-number forms.

use std::future::Future;

use gleura_core::OrderNumberForms;

use crate::error::ShopifyError;
use crate::types::CandidateOrder;

use super::AdminClient;

/// Anything that can run a single order-name search.
///
/// Implemented by [`AdminClient`]; tests substitute in-memory fakes.
pub trait OrderSearch {
    fn search_orders(
        &self,
        name_filter: &str,
    ) -> impl Future<Output = Result<Vec<CandidateOrder>, ShopifyError>> + Send;
}

impl OrderSearch for AdminClient {
    async fn search_orders(&self, name_filter: &str) -> Result<Vec<CandidateOrder>, ShopifyError> {
        AdminClient::search_orders(self, name_filter).await
    }
}

/// Orders found under one of the order-number forms.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The form that produced results (`"#1001"` or `"1001"`).
    pub matched_form: String,
    pub orders: Vec<CandidateOrder>,
}

/// Searches the decorated form first and falls back to the bare form when
/// the first pass comes back empty.
///
/// This is a disambiguation of one input, not a retry policy: an upstream
/// error on either pass is returned immediately. Returns `Ok(None)` when
/// neither form matched anything.
///
/// # Errors
///
/// Propagates the first [`ShopifyError`] from the underlying search.
pub async fn find_orders<S>(
    search: &S,
    forms: &OrderNumberForms,
) -> Result<Option<SearchHit>, ShopifyError>
where
    S: OrderSearch + ?Sized,
{
    for candidate in forms.candidates() {
        let orders = search.search_orders(candidate).await?;
        tracing::debug!(
            name_filter = candidate,
            count = orders.len(),
            "order search pass finished"
        );
        if !orders.is_empty() {
            return Ok(Some(SearchHit {
                matched_form: candidate.to_owned(),
                orders,
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Records every filter it is asked for and answers from a fixed table.
    struct FakeSearch {
        calls: Mutex<Vec<String>>,
        answers: Vec<(&'static str, Vec<CandidateOrder>)>,
    }

    impl FakeSearch {
        fn new(answers: Vec<(&'static str, Vec<CandidateOrder>)>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                answers,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl OrderSearch for FakeSearch {
        async fn search_orders(
            &self,
            name_filter: &str,
        ) -> Result<Vec<CandidateOrder>, ShopifyError> {
            self.calls.lock().unwrap().push(name_filter.to_owned());
            Ok(self
                .answers
                .iter()
                .find(|(filter, _)| *filter == name_filter)
                .map(|(_, orders)| orders.clone())
                .unwrap_or_default())
        }
    }

    fn order(name: &str) -> CandidateOrder {
        CandidateOrder::new(json!({ "name": name }))
    }

    #[tokio::test]
    async fn decorated_hit_skips_bare_pass() {
        let fake = FakeSearch::new(vec![("#1001", vec![order("#1001")])]);
        let forms = OrderNumberForms::parse("1001").unwrap();
        let hit = find_orders(&fake, &forms).await.unwrap().unwrap();
        assert_eq!(hit.matched_form, "#1001");
        assert_eq!(fake.calls(), vec!["#1001"]);
    }

    #[tokio::test]
    async fn falls_back_to_bare_form() {
        let fake = FakeSearch::new(vec![("1001", vec![order("#1001")])]);
        let forms = OrderNumberForms::parse("#1001").unwrap();
        let hit = find_orders(&fake, &forms).await.unwrap().unwrap();
        assert_eq!(hit.matched_form, "1001");
        assert_eq!(fake.calls(), vec!["#1001", "1001"]);
    }

    #[tokio::test]
    async fn returns_none_after_two_empty_passes() {
        let fake = FakeSearch::new(Vec::new());
        let forms = OrderNumberForms::parse("9999").unwrap();
        assert!(find_orders(&fake, &forms).await.unwrap().is_none());
        assert_eq!(fake.calls().len(), 2);
    }
}
