use crate::error::ParseError;
use crate::types::CatalogDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    pub catalog: CatalogDocument,
    pub format: CatalogFormat,
}

pub fn parse_catalog_str(input: &str, format: CatalogFormat) -> Result<ParsedCatalog, ParseError> {
    match format {
        CatalogFormat::Json => Ok(ParsedCatalog {
            catalog: serde_json::from_str::<CatalogDocument>(input)?,
            format,
        }),
        CatalogFormat::Yaml => Ok(ParsedCatalog {
            catalog: serde_yaml::from_str::<CatalogDocument>(input)?,
            format,
        }),
        CatalogFormat::Auto => parse_catalog_auto(input),
    }
}

fn parse_catalog_auto(input: &str) -> Result<ParsedCatalog, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<CatalogDocument>(input) {
            Ok(catalog) => Ok(ParsedCatalog {
                catalog,
                format: CatalogFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<CatalogDocument>(input) {
                Ok(catalog) => Ok(ParsedCatalog {
                    catalog,
                    format: CatalogFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<CatalogDocument>(input) {
        Ok(catalog) => Ok(ParsedCatalog {
            catalog,
            format: CatalogFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(catalog) = serde_json::from_str::<CatalogDocument>(input) {
                return Ok(ParsedCatalog {
                    catalog,
                    format: CatalogFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
