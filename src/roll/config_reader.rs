use crate::roll::*;

use serde::{Deserialize, Serialize};

/// The top-level configuration document for a ward.
///
/// The expected roll file name is a configuration value, never a constant
/// baked into the program.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(rename = "wardName")]
    pub ward_name: String,
    #[serde(rename = "rollFileSources")]
    pub roll_file_sources: Vec<FileSource>,
    pub search: Option<SearchSettings>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    /// 'xlsx' or 'csv'. Inferred from the file extension when missing.
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(rename = "restrictToIdentityFields")]
    pub restrict_to_identity_fields: Option<bool>,
    #[serde(rename = "previewRows")]
    pub preview_rows: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Excel,
    Delimited,
}

impl FileSource {
    pub fn provider_kind(&self) -> RollResult<Provider> {
        match self.provider.as_deref() {
            Some("xlsx") | Some("excel") => Ok(Provider::Excel),
            Some("csv") => Ok(Provider::Delimited),
            Some(x) => whatever!("Provider not implemented {:?}", x),
            None => {
                let lower = self.file_path.to_lowercase();
                if lower.ends_with(".xlsx") {
                    Ok(Provider::Excel)
                } else {
                    Ok(Provider::Delimited)
                }
            }
        }
    }
}

pub fn read_config(path: &str) -> RollResult<LookupConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let config: LookupConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Synthesizes a configuration from the command-line flags when no config
/// file is given. The ward is then named after the roll file.
pub fn config_from_args(args: &Args) -> RollResult<LookupConfig> {
    let input = match args.input.clone() {
        Some(x) => x,
        None => whatever!("Either --config or --input must be provided"),
    };
    let ward_name = io_common::simplify_file_name(input.as_str());
    Ok(LookupConfig {
        ward_name,
        roll_file_sources: vec![FileSource {
            provider: args.input_type.clone(),
            file_path: input,
            worksheet_name: args.excel_worksheet_name.clone(),
        }],
        search: None,
    })
}
