//! Document / RAG endpoints

use super::{segment, ApiClient, ApiError};
use crate::types::{
    AdminResponse, CollectionInfo, DeleteDocumentsRequest, DocumentList, DocumentUpdate,
    EmbeddingStatus, RagDocument, RagQueryRequest, RagQueryResponse, SearchResponse,
    UploadResponse,
};

const BASE: &str = "/api/v1/rag";

/// Results requested for search and RAG queries
pub const DEFAULT_RESULT_COUNT: u32 = 5;

/// Form field values attached to browser uploads
pub const UPLOAD_SOURCE: &str = "web_upload";
pub const UPLOAD_TITLE: &str = "Uploaded Documents";

#[derive(Debug, Clone)]
pub struct RagService {
    client: ApiClient,
}

impl RagService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_documents(&self) -> Result<Vec<RagDocument>, ApiError> {
        let list: DocumentList = self
            .client
            .get_json(&path("/documents"), self.client.timeouts().standard)
            .await?;
        Ok(list.documents)
    }

    /// Upload the files in `form` (field `files`, plus `source` and `title`).
    pub async fn upload_documents(
        &self,
        form: web_sys::FormData,
    ) -> Result<UploadResponse, ApiError> {
        self.client
            .post_form(
                &path("/documents/upload"),
                form,
                self.client.timeouts().upload,
            )
            .await
    }

    pub async fn delete_documents(&self, ids: Vec<String>) -> Result<AdminResponse, ApiError> {
        let body = DeleteDocumentsRequest { document_ids: ids };
        self.client
            .delete_json(
                &path("/documents"),
                Some(&body),
                self.client.timeouts().standard,
            )
            .await
    }

    pub async fn update_document(
        &self,
        id: &str,
        update: &DocumentUpdate,
    ) -> Result<AdminResponse, ApiError> {
        self.client
            .put_json(
                &document_path(id),
                update,
                self.client.timeouts().standard,
            )
            .await
    }

    pub async fn search(&self, query: &str, n_results: u32) -> Result<SearchResponse, ApiError> {
        let body = RagQueryRequest {
            query: query.to_string(),
            n_results,
        };
        self.client
            .post_json(&path("/search"), Some(&body), self.client.timeouts().standard)
            .await
    }

    /// Retrieve context for `query` and the prompt the backend would build.
    pub async fn query(&self, query: &str, n_results: u32) -> Result<RagQueryResponse, ApiError> {
        let body = RagQueryRequest {
            query: query.to_string(),
            n_results,
        };
        self.client
            .post_json(
                &path("/query"),
                Some(&body),
                self.client.timeouts().generation,
            )
            .await
    }

    pub async fn collection_info(&self) -> Result<CollectionInfo, ApiError> {
        self.client
            .get_json(&path("/collection/info"), self.client.timeouts().standard)
            .await
    }

    pub async fn embedding_status(&self) -> Result<EmbeddingStatus, ApiError> {
        self.client
            .get_json(&path("/embedding/status"), self.client.timeouts().standard)
            .await
    }
}

/// Build the multipart body for an upload.
pub fn upload_form(files: &web_sys::FileList) -> Result<web_sys::FormData, ApiError> {
    let encode = |e: wasm_bindgen::JsValue| ApiError::Encode(format!("{:?}", e));

    let form = web_sys::FormData::new().map_err(encode)?;
    for i in 0..files.length() {
        if let Some(file) = files.get(i) {
            form.append_with_blob("files", &file).map_err(encode)?;
        }
    }
    form.append_with_str("source", UPLOAD_SOURCE).map_err(encode)?;
    form.append_with_str("title", UPLOAD_TITLE).map_err(encode)?;
    Ok(form)
}

fn path(suffix: &str) -> String {
    format!("{}{}", BASE, suffix)
}

fn document_path(id: &str) -> String {
    path(&format!("/documents/{}", segment(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(path("/documents"), "/api/v1/rag/documents");
        assert_eq!(path("/collection/info"), "/api/v1/rag/collection/info");
        assert_eq!(document_path("doc 1"), "/api/v1/rag/documents/doc%201");
    }

    #[test]
    fn test_delete_body_shape() {
        let body = DeleteDocumentsRequest {
            document_ids: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "document_ids": ["a", "b"] })
        );
    }

    #[test]
    fn test_query_body_shape() {
        let body = RagQueryRequest {
            query: "アクセス方法は？".into(),
            n_results: DEFAULT_RESULT_COUNT,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "query": "アクセス方法は？", "n_results": 5 })
        );
    }
}
