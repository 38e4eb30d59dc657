//! Writes every artefact of a generation run into one directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span};

use price_common::safe_slug;
use price_core::PricingSession;
use price_model::{ListMeta, PricingOptions};

use crate::error::{ReportError, Result};
use crate::manifest::{InputDigest, Manifest, run_id};
use crate::memory::calculation_memory;
use crate::table::final_table_csv;

pub const PAYLOAD_FILE: &str = "payload.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// File names derived from the list number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub table: String,
    pub memory: String,
}

impl OutputNames {
    pub fn for_list(meta: &ListMeta) -> Self {
        let numero = safe_slug(&meta.numero_lista);
        Self {
            table: format!("Tabela_Final_de_Precos_{numero}.csv"),
            memory: format!("Memoria_de_Calculo_{numero}.txt"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub output_dir: &'a Path,
    /// File the line items were read from; hashed into the manifest.
    pub input: Option<&'a Path>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub run_id: String,
    pub table: PathBuf,
    pub memory: PathBuf,
    pub payload: PathBuf,
    pub manifest: PathBuf,
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn to_json<T: Serialize>(value: &T, what: &'static str) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| ReportError::Json { what, source })
}

pub fn write_outputs(
    session: &PricingSession,
    options: &PricingOptions,
    request: &GenerationRequest<'_>,
) -> Result<GenerationResult> {
    let span = info_span!("generate", output_dir = %request.output_dir.display());
    let _guard = span.enter();

    std::fs::create_dir_all(request.output_dir).map_err(|source| ReportError::Write {
        path: request.output_dir.to_path_buf(),
        source,
    })?;
    let names = OutputNames::for_list(&session.lista_meta);
    let dir = request.output_dir;

    let table = dir.join(&names.table);
    write_file(&table, &final_table_csv(session)?)?;
    debug!(path = %table.display(), "final table written");

    let memory = dir.join(&names.memory);
    write_file(&memory, &calculation_memory(session, options))?;
    debug!(path = %memory.display(), "calculation memory written");

    let payload_data = session.generation_payload();
    let payload = dir.join(PAYLOAD_FILE);
    write_file(&payload, &to_json(&payload_data, "payload")?)?;

    let input = request.input.map(InputDigest::from_file).transpose()?;
    let run_id = run_id(&session.lista_meta, request.generated_at, input.as_ref());
    let manifest_data = Manifest {
        run_id: run_id.clone(),
        saved_at: request.generated_at,
        input,
        lista_meta: session.lista_meta.clone(),
        artefacts: vec![
            names.table.clone(),
            names.memory.clone(),
            PAYLOAD_FILE.to_string(),
        ],
        payload: payload_data,
    };
    let manifest = dir.join(MANIFEST_FILE);
    write_file(&manifest, &to_json(&manifest_data, "manifest")?)?;

    info!(
        run_id = %run_id,
        items = session.items().len(),
        overrides = manifest_data.payload.overrides.len(),
        "artefacts generated"
    );
    Ok(GenerationResult {
        run_id,
        table,
        memory,
        payload,
        manifest,
    })
}
