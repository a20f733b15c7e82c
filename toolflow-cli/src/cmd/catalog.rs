use std::path::Path;
use std::sync::Arc;

use toolflow_core::{parse_catalog_str, CatalogDocument, CatalogFormat, ParsedCatalog, Validate};
use toolflow_exec::events::EventSink;
use toolflow_exec::tool::{HttpClient, ReqwestHttpClient};
use toolflow_exec::{load_catalog, EngineConfig, ToolExecutor, ToolRegistry, WorkflowManager};

use crate::exit_codes;
use crate::output::print_error;
use crate::OutputArgs;

/// Read and parse a catalog file. Errors are reported and mapped to an exit code.
pub fn read_catalog(path: &Path, output: &OutputArgs) -> Result<ParsedCatalog, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    parse_catalog_str(&content, CatalogFormat::Auto).map_err(|e| {
        print_error(output.format, output.quiet, &format!("{e}"));
        exit_codes::VALIDATION_FAILED
    })
}

/// Read, parse and structurally validate a catalog.
pub fn read_valid_catalog(path: &Path, output: &OutputArgs) -> Result<CatalogDocument, i32> {
    let parsed = read_catalog(path, output)?;
    if let Err(err) = parsed.catalog.validate() {
        print_error(
            output.format,
            output.quiet,
            &format!("invalid catalog: {}", err.describe()),
        );
        return Err(exit_codes::VALIDATION_FAILED);
    }
    Ok(parsed.catalog)
}

/// Build an engine around `catalog`: register its tools and create its workflows.
pub fn build_manager(
    catalog: &CatalogDocument,
    config: EngineConfig,
    events: Arc<dyn EventSink>,
    output: &OutputArgs,
) -> Result<WorkflowManager, i32> {
    let http: Arc<dyn HttpClient> = match ReqwestHttpClient::new() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            print_error(output.format, output.quiet, &format!("{e}"));
            return Err(exit_codes::RUNTIME_ERROR);
        }
    };

    let registry = Arc::new(ToolRegistry::new());
    let executor = Arc::new(ToolExecutor::with_config(registry.clone(), &config));
    let manager = WorkflowManager::new(registry, executor, config, events);

    if let Err(e) = load_catalog(&manager, catalog, &http) {
        print_error(output.format, output.quiet, &format!("{e}"));
        return Err(exit_codes::VALIDATION_FAILED);
    }
    Ok(manager)
}

/// Load `catalog` into a throwaway engine so step-to-tool references are checked too.
pub fn check_references(catalog: &CatalogDocument) -> Result<(), String> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new().map_err(|e| e.to_string())?);
    let manager = WorkflowManager::with_registry(Arc::new(ToolRegistry::new()));
    load_catalog(&manager, catalog, &http)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
