//! SAT catalog search endpoints
//!
//! Product/service keys, unit keys, and the Carta Porte 3.1 complement
//! catalogs. Every search accepts `q`, `page` and `limit` query params and
//! returns a paginated [`SearchResult`].

use super::common::SearchResult;
use crate::client::FacturapiClient;
use crate::error::ApiResult;
use crate::request::RequestOptions;
use reqwest::Method;
use serde::{Deserialize, Serialize};

const CARTA_PORTE: &str = "/catalogs/cartaporte/3.1";

/// Catalogs API interface
#[derive(Clone)]
pub struct CatalogsApi {
    client: FacturapiClient,
}

/// Single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// SAT catalog key
    pub key: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Search relevance, when the API ranks results
    #[serde(default)]
    pub score: Option<f64>,
}

impl CatalogsApi {
    /// Create a new catalogs API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Search SAT product/service keys (ClaveProdServ)
    pub async fn search_products<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<CatalogItem>> {
        self.search("/catalogs/products", params).await
    }

    /// Search SAT unit keys (ClaveUnidad)
    pub async fn search_units<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<CatalogItem>> {
        self.search("/catalogs/units", params).await
    }

    /// Carta Porte: air transport codes
    pub async fn search_air_transport_codes<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("air-transport-codes", params).await
    }

    /// Carta Porte: federal transport configurations
    pub async fn search_transport_configs<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("transport-configs", params).await
    }

    /// Carta Porte: rights of passage
    pub async fn search_rights_of_passage<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("rights-of-passage", params).await
    }

    /// Carta Porte: customs document types
    pub async fn search_customs_documents<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("customs-documents", params).await
    }

    /// Carta Porte: packaging types
    pub async fn search_packaging_types<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("packaging-types", params).await
    }

    /// Carta Porte: trailer types
    pub async fn search_trailer_types<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("trailer-types", params).await
    }

    /// Carta Porte: hazardous materials
    pub async fn search_hazardous_materials<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("hazardous-materials", params).await
    }

    /// Carta Porte: naval authorizations
    pub async fn search_naval_authorizations<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("naval-authorizations", params).await
    }

    /// Carta Porte: ports and stations
    pub async fn search_port_stations<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("port-stations", params).await
    }

    /// Carta Porte: marine container types
    pub async fn search_marine_containers<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.carta_porte("marine-containers", params).await
    }

    async fn carta_porte<P: Serialize + ?Sized>(
        &self,
        catalog: &str,
        params: &P,
    ) -> ApiResult<SearchResult<CatalogItem>> {
        self.search(&format!("{CARTA_PORTE}/{catalog}"), params).await
    }

    async fn search<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> ApiResult<SearchResult<CatalogItem>> {
        self.client
            .json(Method::GET, path, RequestOptions::new().params(params)?)
            .await
    }
}

/// Common search query for catalog endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free text to match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl CatalogQuery {
    /// Free-text search
    #[must_use]
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::QueryParams;

    #[test]
    fn test_catalog_query() {
        let query = QueryParams::from_serialize(&CatalogQuery::search("tornillo")).unwrap();
        assert_eq!(query.encode(), "q=tornillo");
    }

    #[test]
    fn test_catalog_item_deserialize() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"key":"31161500","description":"Tornillos","score":12.5}"#).unwrap();
        assert_eq!(item.key, "31161500");
        assert_eq!(item.score, Some(12.5));
    }
}
