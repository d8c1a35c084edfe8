//! Cliente del almacenamiento de objetos
//!
//! Sube imágenes (perfiles y espacios) por la API REST del bucket y
//! devuelve su URL pública.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

pub const BUCKET_PERFILES: &str = "perfiles";
pub const BUCKET_ESPACIOS: &str = "espacios";
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Límite del cuerpo en las rutas de subida: 5 MiB en base64 (~6.7 MiB) más el JSON
pub const MAX_IMAGE_REQUEST_BYTES: usize = 7 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/webp", "webp"),
];

/// Imagen ya decodificada y validada
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub extension: &'static str,
}

/// Decodifica base64 (con o sin prefijo `data:`) y valida tipo y tamaño
pub fn decode_image_payload(data: &str, content_type: &str) -> Result<ImagePayload, AppError> {
    let (content_type, extension) = ALLOWED_CONTENT_TYPES
        .iter()
        .find(|(ct, _)| ct.eq_ignore_ascii_case(content_type.trim()))
        .map(|(ct, ext)| (if *ct == "image/jpg" { "image/jpeg" } else { *ct }, *ext))
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Tipo de imagen no permitido: {} (usa png, jpeg o webp)",
                content_type
            ))
        })?;

    let raw = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    // El tamaño decodificado es ~3/4 del texto; evita decodificar cargas enormes
    if raw.len() / 4 * 3 > MAX_IMAGE_BYTES + 3 {
        return Err(AppError::BadRequest("La imagen supera los 5 MB".to_string()));
    }

    let bytes = STANDARD
        .decode(raw.trim())
        .map_err(|_| AppError::BadRequest("Imagen en base64 inválida".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("La imagen está vacía".to_string()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest("La imagen supera los 5 MB".to_string()));
    }

    Ok(ImagePayload {
        bytes,
        content_type,
        extension,
    })
}

#[derive(Debug, Clone)]
pub struct StorageClient {
    client: Client,
    base_url: Option<String>,
    service_key: Option<String>,
}

impl StorageClient {
    pub fn new(client: Client, base_url: Option<String>, service_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            service_key,
        }
    }

    pub fn from_config(client: Client, config: &EnvironmentConfig) -> Self {
        Self::new(
            client,
            config.storage_url.clone(),
            config.storage_service_key.clone(),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.service_key.is_some()
    }

    fn base_url(&self) -> Result<&str, AppError> {
        self.base_url
            .as_deref()
            .ok_or_else(|| AppError::Storage("Almacenamiento no configurado".to_string()))
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> Result<String, AppError> {
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url()?,
            bucket,
            path
        ))
    }

    /// Sube la imagen a `{bucket}/{carpeta}/{uuid}.{ext}` y devuelve la URL pública
    pub async fn upload_image(
        &self,
        bucket: &str,
        carpeta: &str,
        image: ImagePayload,
    ) -> Result<String, AppError> {
        let base_url = self.base_url()?;
        let service_key = self
            .service_key
            .as_deref()
            .ok_or_else(|| AppError::Storage("Almacenamiento no configurado".to_string()))?;

        let path = format!("{}/{}.{}", carpeta, Uuid::new_v4(), image.extension);
        let url = format!("{}/storage/v1/object/{}/{}", base_url, bucket, path);

        log::info!("📤 Subiendo imagen a {}/{} ({} bytes)", bucket, path, image.bytes.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(service_key)
            .header("apikey", service_key)
            .header(reqwest::header::CONTENT_TYPE, image.content_type)
            .header("x-upsert", "false")
            .body(image.bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Error de conexión con el almacenamiento: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Subida rechazada ({}): {}", status, body);
            return Err(AppError::Storage(format!(
                "El almacenamiento rechazó la imagen ({})",
                status
            )));
        }

        self.public_url(bucket, &path)
    }
}
