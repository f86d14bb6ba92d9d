// [libs/domain/models/src/catalog.rs]
/*!
 * APARATO: FILE CATALOG MODELS
 * RESPONSABILIDAD: METADATOS DE ARCHIVOS DE HASHES Y DICCIONARIOS
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;
use uuid::Uuid;

#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    HashFile,
    Wordlist,
}

/// Entrada de catalogo para un archivo de hashes.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashFile {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    #[typeshare(serialized_as = "number")]
    pub size_bytes: u64,
    pub file_type: String,
    pub md5: String,
}

/// Entrada de catalogo para un diccionario. `word_count` es autoritativo
/// una vez establecido (§3).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wordlist {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    #[typeshare(serialized_as = "number")]
    pub size_bytes: u64,
    pub md5: String,
    #[typeshare(serialized_as = "number")]
    pub word_count: Option<u64>,
}
