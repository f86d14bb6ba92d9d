// [libs/core/splitter/src/lib.rs]
/*!
 * APARATO: WORDLIST SPLITTER (C4)
 * RESPONSABILIDAD: DIVIDIR UN DICCIONARIO EN VENTANAS skip/limit PROPORCIONALES
 * A LA VELOCIDAD DE CADA AGENTE, SIN TOCAR RED NI DISCO.
 *
 * Esta crate es deliberadamente libre de I/O (§4.4 AMBIENT): toma una
 * foto de los candidatos (`SplitCandidate`) y el total de palabras ya
 * resuelto por el llamador (registro + catalogo), y devuelve una
 * particion exacta de `[0, total_words)`. Esto permite probarla con
 * `proptest` sin levantar registro ni almacen de jobs.
 */

use std::cmp::Ordering;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitterError {
    #[error("NO_AGENTS: at least one agent is required to split a job")]
    NoAgents,
    #[error("EMPTY_WORDLIST: total_words must be greater than zero")]
    EmptyWordlist,
}

/// Instantanea de un agente candidato, tal como la ve el llamador tras
/// consultar el registro (C1). No se referencia `Agent` del crate de
/// modelos para mantener esta crate sin dependencias de dominio.
#[derive(Debug, Clone)]
pub struct SplitCandidate {
    pub agent_id: Uuid,
    pub name: String,
    /// Hashes/segundo medidos; 0 dispara la estimacion por capacidades (§4.4.3).
    pub speed: u64,
    pub capabilities: String,
}

/// Una ventana resultante, lista para persistirse como `SubJob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubJobWindow {
    pub agent_id: Uuid,
    pub name: String,
    pub skip: u64,
    pub limit: u64,
}

/// Estimacion de velocidad por capacidades cuando `speed == 0` (§4.4.3).
/// Coincidencia de subcadena insensible a mayusculas; se toma el valor
/// mas alto entre las coincidencias. Sin coincidencias, se asume la
/// linea base de CPU (1) para no anular el peso del agente.
pub fn estimate_speed_from_capabilities(capabilities: &str) -> u64 {
    let lower = capabilities.to_lowercase();
    let mut best = 0u64;
    for (needle, value) in [("rtx", 8u64), ("gtx", 6), ("gpu", 5), ("cpu", 1)] {
        if lower.contains(needle) && value > best {
            best = value;
        }
    }
    if best == 0 {
        1
    } else {
        best
    }
}

fn effective_speed(candidate: &SplitCandidate) -> u64 {
    if candidate.speed == 0 {
        estimate_speed_from_capabilities(&candidate.capabilities)
    } else {
        candidate.speed
    }
}

/// Divide `total_words` entre `candidates`, devolviendo una ventana por
/// agente (salvo los excluidos por el redondeo degenerado del §4.4 paso
/// 5). El resultado conserva el orden de entrada de `candidates`.
///
/// Procedimiento (§4.4):
/// 1. Peso proporcional a la velocidad efectiva de cada agente.
/// 2. Los limites se calculan ordenando por velocidad descendente
///    (empates resueltos por estabilidad de orden de entrada); el ultimo
///    de ese orden recibe el resto exacto para garantizar la particion.
/// 3. Si un limite calculado es menor que 1, se eleva a 1 deduciendo una
///    unidad del peer de mayor limite; si esa deduccion dejaria a ese
///    peer por debajo de 1, el peer es excluido por completo en vez de
///    emitir una ventana nula o negativa.
/// 4. Las ventanas finales se reordenan de vuelta al orden de entrada
///    antes de asignar `skip` acumulativo, de modo que el nombre y la
///    posicion del sub-job reflejen el orden en que el llamador presento
///    los agentes.
pub fn split(
    total_words: u64,
    parent_name: &str,
    candidates: &[SplitCandidate],
) -> Result<Vec<SubJobWindow>, SplitterError> {
    if candidates.is_empty() {
        return Err(SplitterError::NoAgents);
    }
    if total_words == 0 {
        return Err(SplitterError::EmptyWordlist);
    }

    let speeds: Vec<u64> = candidates.iter().map(effective_speed).collect();
    let total_speed: u128 = speeds.iter().map(|s| *s as u128).sum();

    // Orden descendente estable por velocidad efectiva (empates conservan
    // el orden de entrada, que es lo que exige un `sort_by` estable).
    let mut sorted_indices: Vec<usize> = (0..candidates.len()).collect();
    sorted_indices.sort_by(|&a, &b| speeds[b].cmp(&speeds[a]));

    // Paso 2: limite bruto por agente; el ultimo del orden ordenado recibe
    // el resto exacto.
    let mut limits: Vec<i64> = vec![0; candidates.len()];
    let mut assigned_sum: u64 = 0;
    for (rank, &idx) in sorted_indices.iter().enumerate() {
        if rank == sorted_indices.len() - 1 {
            continue; // resuelto tras el bucle
        }
        let weight = speeds[idx] as f64 / total_speed as f64;
        let raw = (total_words as f64 * weight).round() as i64;
        limits[idx] = raw;
        assigned_sum += raw.max(0) as u64;
    }
    let last_idx = *sorted_indices.last().expect("non-empty by construction");
    limits[last_idx] = total_words as i64 - assigned_sum as i64;

    // Paso 3: saneo de limites degenerados (<1), en orden descendente para
    // resolver primero el caso mas propenso (el resto del ultimo agente).
    let mut excluded: Vec<bool> = vec![false; candidates.len()];
    for &idx in sorted_indices.iter().rev() {
        if excluded[idx] || limits[idx] >= 1 {
            continue;
        }
        limits[idx] = 1;
        // Busca el peer de mayor limite actual (no excluido, distinto de idx).
        let donor = sorted_indices
            .iter()
            .copied()
            .filter(|&other| other != idx && !excluded[other])
            .max_by(|&a, &b| match limits[a].cmp(&limits[b]) {
                Ordering::Equal => speeds[b].cmp(&speeds[a]),
                ord => ord,
            });
        match donor {
            Some(donor_idx) if limits[donor_idx] - 1 >= 1 => {
                limits[donor_idx] -= 1;
            }
            Some(donor_idx) => {
                // El donante quedaria por debajo de 1: se excluye del todo.
                excluded[donor_idx] = true;
                limits[donor_idx] = 0;
            }
            None => {
                // No hay de donde descontar; no se puede satisfacer la
                // ventana minima para este agente tampoco.
                excluded[idx] = true;
                limits[idx] = 0;
            }
        }
    }

    // Paso 4: de vuelta al orden de entrada, descartando excluidos, y
    // asignacion de `skip` acumulativo.
    let mut windows = Vec::with_capacity(candidates.len());
    let mut skip: u64 = 0;
    for (idx, candidate) in candidates.iter().enumerate() {
        if excluded[idx] || limits[idx] < 1 {
            continue;
        }
        let limit = limits[idx] as u64;
        windows.push(SubJobWindow {
            agent_id: candidate.agent_id,
            name: format!("{} ({})", parent_name, candidate.name),
            skip,
            limit,
        });
        skip += limit;
    }

    windows.sort_by_key(|w| w.skip);
    Ok(windows)
}
