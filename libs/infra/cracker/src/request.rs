// [libs/infra/cracker/src/request.rs]
/*!
 * APARATO: CRACK REQUEST
 * RESPONSABILIDAD: PARAMETROS DE UNA INVOCACION DEL CRACKER EXTERNO (§4.8)
 */

use std::path::PathBuf;

/// Juego deprecado de tipos de hash WPA/WPA2 y su equivalente moderno
/// (§4.8 "Hash-type remapping"). Se intenta el nuevo valor primero; si el
/// cracker lo rechaza (exit 255), se reintenta con el original.
pub const DEPRECATED_HASH_TYPES: [(i32, i32); 3] = [(2500, 22000), (2501, 22001), (2502, 22002)];

pub fn remapped_hash_type(hash_type: i32) -> Option<i32> {
    DEPRECATED_HASH_TYPES
        .iter()
        .find(|(old, _)| *old == hash_type)
        .map(|(_, new)| *new)
}

/// Una invocacion concreta del cracker externo contra un sub-job.
#[derive(Debug, Clone)]
pub struct CrackRequest {
    pub binary: PathBuf,
    pub hash_file: PathBuf,
    pub wordlist: PathBuf,
    pub hash_type: i32,
    pub attack_mode: i32,
    pub rules: Option<String>,
    pub skip: u64,
    pub limit: u64,
    pub outfile: PathBuf,
}

impl CrackRequest {
    /// Construye los argumentos de linea de comandos para `hash_type` dado
    /// (usado tanto para el intento original como para el remapeado, §4.8).
    pub fn args_for(&self, hash_type: i32) -> Vec<String> {
        let mut args = vec![
            "-m".to_string(),
            hash_type.to_string(),
            "-a".to_string(),
            self.attack_mode.to_string(),
            "-o".to_string(),
            self.outfile.to_string_lossy().into_owned(),
            "--skip".to_string(),
            self.skip.to_string(),
            "--limit".to_string(),
            (self.skip + self.limit).to_string(),
            "--status".to_string(),
            "--status-timer=1".to_string(),
        ];
        if let Some(rules) = &self.rules {
            args.push("-r".to_string());
            args.push(rules.clone());
        }
        args.push(self.hash_file.to_string_lossy().into_owned());
        args.push(self.wordlist.to_string_lossy().into_owned());
        args
    }
}
