use std::io::Read;

use crate::body::{Multipart, Part, RequestBody};
use crate::decode::ResponseShape;
use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::types::{DeleteDocumentResponse, DocumentAccepted, DocumentStatus};

use super::{require, Call, DiscoveryClient, Operation};

const DOCUMENTS: &[&str] = &["v1/environments", "collections", "documents"];

/// Document content and metadata for add and update. At least one of
/// `file` and `metadata` must be set.
#[derive(Default)]
pub struct DocumentUpload {
    pub file: Option<Box<dyn Read + Send>>,
    pub filename: Option<String>,
    /// MIME type of `file`, e.g. `application/pdf`.
    pub file_content_type: Option<String>,
    /// JSON object with arbitrary metadata, sent as its own part.
    pub metadata: Option<String>,
    /// Ask the service to process the document even if an identical one exists.
    pub force: Option<bool>,
}

impl std::fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file", &self.file.as_ref().map(|_| ".."))
            .field("filename", &self.filename)
            .field("file_content_type", &self.file_content_type)
            .field("metadata", &self.metadata)
            .field("force", &self.force)
            .finish()
    }
}

impl DocumentUpload {
    pub fn file(file: impl Read + Send + 'static, filename: impl Into<String>) -> Self {
        Self {
            file: Some(Box::new(file)),
            filename: Some(filename.into()),
            ..Default::default()
        }
    }

    pub fn metadata(metadata: impl Into<String>) -> Self {
        Self {
            metadata: Some(metadata.into()),
            ..Default::default()
        }
    }

    /// Split into the multipart form and the request headers it implies.
    fn into_parts(self) -> Result<(Multipart, Vec<(String, String)>)> {
        if self.file.is_none() && self.metadata.is_none() {
            return Err(Error::validation("at least one of file or metadata must be supplied"));
        }
        let file = self.file.map(|reader| Part {
            filename: self.filename,
            content_type: self.file_content_type,
            ..Part::reader("file", reader)
        });
        let metadata = self.metadata.map(|m| Part::text("metadata", m));
        let form = Multipart::new().part_opt(file).part_opt(metadata);

        let mut headers = Vec::new();
        if let Some(force) = self.force {
            headers.push(("X-Watson-Discovery-Force".to_string(), force.to_string()));
        }
        Ok((form, headers))
    }
}

#[derive(Debug, Default)]
pub struct AddDocumentOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub upload: DocumentUpload,
    pub headers: Vec<(String, String)>,
}

impl AddDocumentOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>, upload: DocumentUpload) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            upload,
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct UpdateDocumentOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub document_id: String,
    pub upload: DocumentUpload,
    pub headers: Vec<(String, String)>,
}

/// Identifies one document. Shared by status lookup and deletion.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub document_id: String,
    pub headers: Vec<(String, String)>,
}

impl DocumentOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            document_id: document_id.into(),
            headers: Vec::new(),
        }
    }

    fn ids(&self) -> Result<[&str; 3]> {
        require("environment_id", &self.environment_id)?;
        require("collection_id", &self.collection_id)?;
        require("document_id", &self.document_id)?;
        Ok([
            self.environment_id.as_str(),
            self.collection_id.as_str(),
            self.document_id.as_str(),
        ])
    }
}

impl DiscoveryClient {
    /// Ingest a new document. Returns as soon as the service accepts it;
    /// poll `get_document_status` for the outcome.
    pub fn add_document(&self, options: AddDocumentOptions) -> Result<Operation<DocumentAccepted>> {
        require("environment_id", &options.environment_id)?;
        require("collection_id", &options.collection_id)?;
        let (form, mut headers) = options.upload.into_parts()?;
        headers.extend(options.headers);
        let call = Call::new(HttpMethod::Post, DOCUMENTS)
            .params(&[options.environment_id.as_str(), options.collection_id.as_str()])
            .body(RequestBody::Multipart(form))
            .headers(&headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn get_document_status(&self, options: &DocumentOptions) -> Result<Operation<DocumentStatus>> {
        let call = Call::new(HttpMethod::Get, DOCUMENTS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }

    /// Replace a document's content or metadata.
    pub fn update_document(&self, options: UpdateDocumentOptions) -> Result<Operation<DocumentAccepted>> {
        require("environment_id", &options.environment_id)?;
        require("collection_id", &options.collection_id)?;
        require("document_id", &options.document_id)?;
        let (form, mut headers) = options.upload.into_parts()?;
        headers.extend(options.headers);
        let call = Call::new(HttpMethod::Post, DOCUMENTS)
            .params(&[
                options.environment_id.as_str(),
                options.collection_id.as_str(),
                options.document_id.as_str(),
            ])
            .body(RequestBody::Multipart(form))
            .headers(&headers);
        self.prepare(call, ResponseShape::Json)
    }

    pub fn delete_document(&self, options: &DocumentOptions) -> Result<Operation<DeleteDocumentResponse>> {
        let call = Call::new(HttpMethod::Delete, DOCUMENTS)
            .params(&options.ids()?)
            .headers(&options.headers);
        self.prepare(call, ResponseShape::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client;
    use std::io::Cursor;

    fn boundary(content_type: &str) -> &str {
        content_type.split("boundary=").nth(1).unwrap()
    }

    #[test]
    fn add_document_with_file_and_metadata() {
        let upload = DocumentUpload {
            file_content_type: Some("text/html".into()),
            metadata: Some(r#"{"source":"web"}"#.into()),
            force: Some(true),
            ..DocumentUpload::file(Cursor::new(b"<p>hi</p>".to_vec()), "page.html")
        };
        let op = client().add_document(AddDocumentOptions::new("env1", "coll1", upload)).unwrap();
        let req = &op.request;
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "https://x/api/v1/environments/env1/collections/coll1/documents?version=2018-03-05"
        );
        assert_eq!(req.header("X-Watson-Discovery-Force"), Some("true"));

        let boundary = boundary(req.header("content-type").unwrap());
        let body = req.body_text().unwrap();
        assert_eq!(body.matches(&format!("--{boundary}\r\n")).count(), 2);
        assert!(body.contains("name=\"file\"; filename=\"page.html\"\r\nContent-Type: text/html\r\n\r\n<p>hi</p>\r\n"));
        assert!(body.contains("name=\"metadata\"\r\n\r\n{\"source\":\"web\"}\r\n"));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn add_document_metadata_only() {
        let op = client()
            .add_document(AddDocumentOptions::new("env1", "coll1", DocumentUpload::metadata("{}")))
            .unwrap();
        let body = op.request.body_text().unwrap();
        assert!(!body.contains("name=\"file\""));
        assert_eq!(op.request.header("X-Watson-Discovery-Force"), None);
    }

    #[test]
    fn add_document_needs_file_or_metadata() {
        let err = client()
            .add_document(AddDocumentOptions::new("env1", "coll1", DocumentUpload::default()))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn update_document_targets_document() {
        let options = UpdateDocumentOptions {
            environment_id: "env1".into(),
            collection_id: "coll1".into(),
            document_id: "doc1".into(),
            upload: DocumentUpload::metadata("{}"),
            headers: Vec::new(),
        };
        let op = client().update_document(options).unwrap();
        assert_eq!(op.request.method, HttpMethod::Post);
        assert_eq!(
            op.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/documents/doc1?version=2018-03-05"
        );
    }

    #[test]
    fn status_and_delete_paths() {
        let options = DocumentOptions::new("env1", "coll1", "doc 1");
        let status = client().get_document_status(&options).unwrap();
        assert_eq!(
            status.request.url,
            "https://x/api/v1/environments/env1/collections/coll1/documents/doc%201?version=2018-03-05"
        );
        let delete = client().delete_document(&options).unwrap();
        assert_eq!(delete.request.method, HttpMethod::Delete);
        assert!(client().delete_document(&DocumentOptions::new("env1", "coll1", "")).is_err());
    }
}
