// [libs/domain/store/src/catalog.rs]
/*!
 * APARATO: FILE CATALOG (C3)
 * RESPONSABILIDAD: REGISTRO DE ARCHIVOS DE HASHES Y DICCIONARIOS, CONTEO
 * DE PALABRAS Y ACCESO A BYTES PARA EL DRIVER DE CRACKEO (§4.3).
 *
 * El catalogo guarda metadatos en memoria (`RwLock`); los bytes viven en
 * disco bajo un directorio raiz compartido. El MD5 se calcula una sola
 * vez al registrar (§4.3 paso 2) y el conteo de palabras es perezoso:
 * se resuelve la primera vez que el divisor (C4) lo necesita y queda
 * en cache en la entrada de catalogo.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use hashwarden_domain_models::catalog::{HashFile, Wordlist};
use md5::{Digest, Md5};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("NOT_FOUND: no catalog entry with id {0}")]
    NotFound(Uuid),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Default)]
struct CatalogInner {
    hash_files: HashMap<Uuid, HashFile>,
    wordlists: HashMap<Uuid, Wordlist>,
}

/// Catalogo de archivos de hashes y diccionarios bajo `root`. Todas las
/// rutas de catalogo se resuelven relativas a esta raiz (§4.3 AMBIENT:
/// sin backend de objetos, solo un directorio local).
pub struct FileCatalog {
    root: PathBuf,
    inner: RwLock<CatalogInner>,
}

impl FileCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            inner: RwLock::new(CatalogInner::default()),
        }
    }

    pub fn resolve(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Registra un archivo de hashes ya escrito bajo `root`, calculando su
    /// MD5 y tamano (§4.3 paso 2).
    pub async fn register_hash_file(
        &self,
        name: impl Into<String>,
        relative_path: impl Into<String>,
        file_type: impl Into<String>,
    ) -> Result<HashFile, CatalogError> {
        let relative_path = relative_path.into();
        let abs_path = self.resolve(&relative_path);
        let (size_bytes, md5) = hash_and_size(&abs_path).await?;

        let entry = HashFile {
            id: Uuid::new_v4(),
            name: name.into(),
            path: relative_path,
            size_bytes,
            file_type: file_type.into(),
            md5,
        };
        self.inner
            .write()
            .expect("catalog lock poisoned")
            .hash_files
            .insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Registra un diccionario. El conteo de palabras se deja en `None`
    /// hasta que `word_count` lo resuelva y lo deje en cache (§4.3 paso 3).
    pub async fn register_wordlist(
        &self,
        name: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Result<Wordlist, CatalogError> {
        let relative_path = relative_path.into();
        let abs_path = self.resolve(&relative_path);
        let (size_bytes, md5) = hash_and_size(&abs_path).await?;

        let entry = Wordlist {
            id: Uuid::new_v4(),
            name: name.into(),
            path: relative_path,
            size_bytes,
            md5,
            word_count: None,
        };
        self.inner
            .write()
            .expect("catalog lock poisoned")
            .wordlists
            .insert(entry.id, entry.clone());
        Ok(entry)
    }

    pub fn get_hash_file(&self, id: Uuid) -> Option<HashFile> {
        self.inner
            .read()
            .expect("catalog lock poisoned")
            .hash_files
            .get(&id)
            .cloned()
    }

    pub fn get_wordlist(&self, id: Uuid) -> Option<Wordlist> {
        self.inner
            .read()
            .expect("catalog lock poisoned")
            .wordlists
            .get(&id)
            .cloned()
    }

    pub fn list_hash_files(&self) -> Vec<HashFile> {
        self.inner
            .read()
            .expect("catalog lock poisoned")
            .hash_files
            .values()
            .cloned()
            .collect()
    }

    pub fn list_wordlists(&self) -> Vec<Wordlist> {
        self.inner
            .read()
            .expect("catalog lock poisoned")
            .wordlists
            .values()
            .cloned()
            .collect()
    }

    /// Resuelve y cachea `word_count` para un diccionario, contando
    /// saltos de linea en streaming (sin cargar el archivo completo en
    /// memoria, §4.3 paso 3 AMBIENT).
    pub async fn word_count(&self, id: Uuid) -> Result<u64, CatalogError> {
        if let Some(wordlist) = self.get_wordlist(id) {
            if let Some(count) = wordlist.word_count {
                return Ok(count);
            }
        } else {
            return Err(CatalogError::NotFound(id));
        }

        let abs_path = {
            let guard = self.inner.read().expect("catalog lock poisoned");
            let wordlist = guard.wordlists.get(&id).ok_or(CatalogError::NotFound(id))?;
            self.root.join(&wordlist.path)
        };
        let count = count_lines(&abs_path).await?;

        let mut guard = self.inner.write().expect("catalog lock poisoned");
        if let Some(wordlist) = guard.wordlists.get_mut(&id) {
            wordlist.word_count = Some(count);
        }
        Ok(count)
    }
}

async fn hash_and_size(path: &Path) -> Result<(u64, String), std::io::Error> {
    let mut file = tokio::fs::File::open(path).await?;
    let metadata = file.metadata().await?;
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    let digest = hasher.finalize();
    Ok((metadata.len(), hex::encode(digest)))
}

/// Cuenta lineas crudas, incluidas las vacias: el divisor (C4) particiona
/// `[0, word_count)` y el cracker externo indexa `--skip`/`--limit` sobre
/// el mismo conteo de lineas del archivo, asi que una linea en blanco debe
/// contar aqui exactamente igual que alli (§4.3, §4.8 "Local verification").
async fn count_lines(path: &Path) -> Result<u64, std::io::Error> {
    let file = tokio::fs::File::open(path).await?;
    let mut reader = BufReader::new(file);
    let mut count = 0u64;
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader.read_line(&mut line).await?;
        if read == 0 {
            break;
        }
        count += 1;
    }
    Ok(count)
}
