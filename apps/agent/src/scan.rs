// [apps/agent/src/scan.rs]
/*!
 * APARATO: LOCAL FILE AREA SCANNER
 * RESPONSABILIDAD: INVENTARIAR `<upload_dir>/{wordlists,hash-files}` EN
 * UN MAPA `nombre -> entrada` PARA QUE EL EJECUTOR RESUELVA ARCHIVOS
 * LOCALMENTE ANTES DE PEDIR UNA DESCARGA (§4.7 pasos 6 y "Executor").
 *
 * No existe una ruta HTTP de "anuncio de catalogo" en la superficie del
 * coordinador (la carga de archivos es un Non-goal explicito); el
 * inventario que produce este modulo es, por lo tanto, un recurso
 * puramente local al agente, no algo que se publique por red.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use hashwarden_domain_models::FileKind;
use md5::{Digest, Md5};
use tokio::io::AsyncReadExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub md5: String,
    pub kind: FileKind,
}

/// Recorre `wordlists/` y `hash-files/` bajo `upload_dir`, indexando por
/// nombre de archivo. Directorios ausentes se tratan como vacios.
pub async fn scan_local_area(upload_dir: &Path) -> std::io::Result<HashMap<String, LocalFileEntry>> {
    let mut inventory = HashMap::new();
    scan_kind(&upload_dir.join("wordlists"), FileKind::Wordlist, &mut inventory).await?;
    scan_kind(&upload_dir.join("hash-files"), FileKind::HashFile, &mut inventory).await?;
    Ok(inventory)
}

async fn scan_kind(
    dir: &Path,
    kind: FileKind,
    inventory: &mut HashMap<String, LocalFileEntry>,
) -> std::io::Result<()> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let (size_bytes, md5) = hash_and_size(&path).await?;
        inventory.insert(
            name.to_string(),
            LocalFileEntry {
                path,
                size_bytes,
                md5,
                kind,
            },
        );
    }
    Ok(())
}

async fn hash_and_size(path: &Path) -> std::io::Result<(u64, String)> {
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
    Ok((metadata.len(), hex::encode(hasher.finalize())))
}
