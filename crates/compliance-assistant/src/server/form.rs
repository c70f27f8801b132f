//! Form extractor accepting multipart or urlencoded bodies

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};

use crate::error::{Error, Result};

/// An uploaded file part
#[derive(Debug, Clone)]
pub struct FormFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Text fields and file parts of a submitted form
#[derive(Debug, Default)]
pub struct FormFields {
    text: HashMap<String, String>,
    files: HashMap<String, FormFile>,
}

impl FormFields {
    /// Required text field
    pub fn text(&self, name: &str) -> Result<&str> {
        self.text
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingField(name.to_string()))
    }

    /// Required file part
    pub fn file(&self, name: &str) -> Result<&FormFile> {
        self.files
            .get(name)
            .ok_or_else(|| Error::MissingField(name.to_string()))
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut fields = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::InvalidForm(format!("Failed to read multipart field: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_some() {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidForm(format!("Failed to read file: {}", e)))?;
                fields.files.insert(
                    name,
                    FormFile {
                        filename,
                        content_type,
                        data,
                    },
                );
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::InvalidForm(format!("Failed to read field '{}': {}", name, e)))?;
                fields.text.insert(name, value);
            }
        }

        Ok(fields)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| Error::InvalidForm(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(text) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| Error::InvalidForm(e.body_text()))?;
            Ok(Self {
                text,
                files: HashMap::new(),
            })
        } else {
            Err(Error::InvalidForm(
                "expected multipart/form-data or application/x-www-form-urlencoded".to_string(),
            ))
        }
    }
}
