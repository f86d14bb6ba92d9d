// [apps/agent/src/capability.rs]
/*!
 * APARATO: CAPABILITY DETECTION
 * RESPONSABILIDAD: DESCUBRIR LAS CAPACIDADES DE COMPUTO LOCALES Y
 * VALIDAR QUE UNA DIRECCION IP DECLARADA PERTENECE A ESTA MAQUINA
 * (§4.7 pasos 3 y 4).
 *
 * La deteccion de GPU se apoya en sondas de shell sobre las mismas
 * rutas de `/sys` que el motor de telemetria de hardware consulta para
 * frecuencia y temperatura, retargetadas aqui a la deteccion de
 * controlador en vez de metricas termicas.
 */

use std::fs;

/// Verifica que `ip` coincida con alguna direccion de una interfaz de
/// red local (§4.7 paso 3). Un desajuste es fatal para el arranque.
pub fn is_local_address(ip: &str) -> bool {
    let Ok(target) = ip.parse::<std::net::IpAddr>() else {
        return false;
    };
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces.iter().any(|iface| iface.ip() == target),
        Err(_) => false,
    }
}

/// Heuristica de deteccion de capacidades (§4.7 paso 4): intenta
/// reconocer un controlador NVIDIA a traves de `/proc/driver/nvidia`,
/// luego un dispositivo DRM generico bajo `/sys/class/drm`, y si
/// ninguno responde, cae de vuelta a "CPU".
pub fn detect_capabilities() -> String {
    if fs::metadata("/proc/driver/nvidia/version").is_ok() {
        return detect_nvidia_model().unwrap_or_else(|| "GPU".to_string());
    }
    if fs::read_dir("/sys/class/drm")
        .map(|mut entries| entries.any(|entry| entry.is_ok()))
        .unwrap_or(false)
    {
        return "GPU".to_string();
    }
    "CPU".to_string()
}

fn detect_nvidia_model() -> Option<String> {
    let entries = fs::read_dir("/proc/driver/nvidia/gpus").ok()?;
    for entry in entries.flatten() {
        let info_path = entry.path().join("information");
        if let Ok(info) = fs::read_to_string(info_path) {
            if let Some(line) = info.lines().find(|l| l.starts_with("Model:")) {
                return Some(line.trim_start_matches("Model:").trim().to_string());
            }
        }
    }
    Some("GPU".to_string())
}
