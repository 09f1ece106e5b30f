use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    ApiResponse, BatchInfo, TaxCalculatorPayload, TaxCalculatorResponse, VehicleValuation,
};
use crate::infra::api::{ApiClient, ApiClientError};

const TAX_CALCULATOR_PATH: &str = "/web/tax-calculator";
const VALUATION_SEARCH_PATH: &str = "/web/valuation/search";
const BATCH_INFO_PATH: &str = "/web/valuation/batch-info";
const MAILING_LIST_PATH: &str = "/web/mailing-list";

#[derive(Serialize)]
struct SearchRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct MailingListRequest<'a> {
    email: &'a str,
}

/// Public calculator and valuation endpoints.
#[derive(Clone)]
pub struct TaxApi {
    client: ApiClient,
}

impl TaxApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch_taxes(
        &self,
        payload: &TaxCalculatorPayload,
    ) -> Result<TaxCalculatorResponse, ApiClientError> {
        self.client
            .post_data(TAX_CALCULATOR_PATH, Some(payload))
            .await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<VehicleValuation>, ApiClientError> {
        self.client
            .post_data(VALUATION_SEARCH_PATH, Some(&SearchRequest { name }))
            .await
    }

    pub async fn fetch_latest_batch_info(&self) -> Result<BatchInfo, ApiClientError> {
        self.client.get_data(BATCH_INFO_PATH).await
    }

    /// Returns the whole envelope so callers can show the backend's message.
    /// A reply without `data` is still a success.
    pub async fn add_email(
        &self,
        email: &str,
    ) -> Result<ApiResponse<Option<Value>>, ApiClientError> {
        self.client
            .post(MAILING_LIST_PATH, Some(&MailingListRequest { email }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelYear;
    use crate::infra::test_support::MockBackend;
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    fn batch_json() -> Value {
        json!({ "id": 4, "title": "Q1 2024 review", "review_date": "2024-03-05 00:00:00" })
    }

    #[tokio::test]
    async fn search_returns_unwrapped_list() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/valuation/search",
                StatusCode::OK,
                json!({
                    "message": "ok",
                    "data": [{
                        "id": 11, "name": "TOYOTA PREMIO", "hsc": "87032290", "model": "NZT260",
                        "year": 2016, "origin": "JAPAN", "cc": "1500", "unit": "unit",
                        "cif": 6200, "batch": batch_json(),
                    }],
                }),
            )
            .spawn()
            .await;
        let api = TaxApi::new(ApiClient::builder(&backend.base_url()).build().unwrap());

        let results = api.search("").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "TOYOTA PREMIO");
        assert_eq!(results[0].year, Some(ModelYear::Number(2016)));
        assert_eq!(results[0].batch.id, 4);

        let recorded = backend.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, Method::POST);
        assert_eq!(recorded[0].body, Some(json!({ "name": "" })));
    }

    #[tokio::test]
    async fn batch_info_is_a_single_get() {
        let backend = MockBackend::new()
            .respond(
                Method::GET,
                "/api/web/valuation/batch-info",
                StatusCode::OK,
                json!({ "message": "", "data": batch_json() }),
            )
            .spawn()
            .await;
        let api = TaxApi::new(ApiClient::builder(&backend.base_url()).build().unwrap());

        let batch = api.fetch_latest_batch_info().await.unwrap();
        assert_eq!(batch.title, "Q1 2024 review");
        assert_eq!(batch.review_date, "2024-03-05 00:00:00");
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn fetch_taxes_posts_payload() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/tax-calculator",
                StatusCode::OK,
                json!({
                    "message": "",
                    "data": {
                        "totalTax": 21000000.0, "formFees": 20000.0, "stampDuty": 35000.0,
                        "registrationFees": 1500000.0, "exciseDuty": 0.0, "importCommission": 0.0,
                        "infrastructureTax": 555000.0, "envLevy": 7400000.0, "withholding": 2220000.0,
                        "vat": 8500000.0, "importDuty": 9250000.0, "cifUGX": 37000000.0,
                        "usdRate": 3700.0, "totalCarValue": 58000000.0,
                    },
                }),
            )
            .spawn()
            .await;
        let api = TaxApi::new(ApiClient::builder(&backend.base_url()).build().unwrap());

        let payload = TaxCalculatorPayload {
            cif: Some(10_000.0),
            year: ModelYear::Number(2015),
            is_luxury: false,
            is_ev: false,
            make: "Toyota".into(),
        };
        let taxes = api.fetch_taxes(&payload).await.unwrap();
        assert_eq!(taxes.total_tax, 21_000_000.0);
        assert_eq!(taxes.cif_ugx, 37_000_000.0);

        let recorded = backend.requests();
        assert_eq!(
            recorded[0].body,
            Some(json!({
                "cif": 10000.0, "year": 2015, "isLuxury": false, "isEV": false, "make": "Toyota",
            }))
        );
    }

    #[tokio::test]
    async fn add_email_returns_full_envelope() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/mailing-list",
                StatusCode::CREATED,
                json!({ "message": "Subscribed", "data": { "id": 3 } }),
            )
            .spawn()
            .await;
        let api = TaxApi::new(ApiClient::builder(&backend.base_url()).build().unwrap());

        let envelope = api.add_email("driver@example.com").await.unwrap();
        assert_eq!(envelope.message, "Subscribed");
        assert_eq!(envelope.data, Some(json!({ "id": 3 })));
        assert_eq!(
            backend.requests()[0].body,
            Some(json!({ "email": "driver@example.com" }))
        );
    }

    #[tokio::test]
    async fn http_errors_propagate() {
        let backend = MockBackend::new().spawn().await;
        let api = TaxApi::new(ApiClient::builder(&backend.base_url()).build().unwrap());

        let err = api.fetch_latest_batch_info().await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn add_email_accepts_message_only_reply() {
        let backend = MockBackend::new()
            .respond(
                Method::POST,
                "/api/web/mailing-list",
                StatusCode::OK,
                json!({ "message": "Subscribed" }),
            )
            .spawn()
            .await;
        let api = TaxApi::new(ApiClient::builder(&backend.base_url()).build().unwrap());

        let envelope = api.add_email("driver@example.com").await.unwrap();
        assert_eq!(envelope.message, "Subscribed");
        assert_eq!(envelope.data, None);
    }
}
