//! Cubre escenarios de deteccion de capacidades y validacion de
//! direccion local mas alla de las pruebas unitarias en linea del
//! propio modulo (§4.7 pasos 3 y 4).

use hashwarden_agent::capability::{detect_capabilities, is_local_address};

#[test]
fn loopback_address_is_recognized_as_local() {
    assert!(is_local_address("127.0.0.1"));
}

#[test]
fn an_address_belonging_to_another_host_is_not_local() {
    // 203.0.113.0/24 esta reservado para documentacion (RFC 5737) y no
    // puede coincidir con ninguna interfaz real de esta maquina.
    assert!(!is_local_address("203.0.113.77"));
}

#[test]
fn ipv6_unspecified_address_is_rejected_when_absent() {
    assert!(!is_local_address("2001:db8::1"));
}

#[test]
fn detect_capabilities_is_deterministic_across_calls() {
    let first = detect_capabilities();
    let second = detect_capabilities();
    assert_eq!(first, second, "hardware probing must not flap between calls");
}

#[test]
fn detect_capabilities_falls_back_to_cpu_when_no_gpu_driver_is_probed() {
    // El entorno de pruebas no expone `/proc/driver/nvidia` ni
    // `/sys/class/drm`, asi que la heuristica debe caer a "CPU".
    let detected = detect_capabilities();
    if std::path::Path::new("/proc/driver/nvidia/version").exists()
        || std::fs::read_dir("/sys/class/drm").map(|mut e| e.any(|x| x.is_ok())).unwrap_or(false)
    {
        return;
    }
    assert_eq!(detected, "CPU");
}
