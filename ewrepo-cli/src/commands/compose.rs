//! Compose commands: build suffixes from components.

use clap::ValueEnum;
use ewrepo::suffix::{
    compose, dot_app_file_suffix, dot_rel_file_suffix, erts_package_suffix, Side,
    SuffixComponents, SuffixParser, META_AREA, PACKAGE_ARCHIVE_EXT, SEPARATOR,
};

use crate::error::CliError;

/// Side selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum SideArg {
    /// Library packages
    Lib,
    /// Release descriptors
    Releases,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Lib => Side::Lib,
            SideArg::Releases => Side::Releases,
        }
    }
}

/// Components requested on the command line for `compose`.
#[derive(Debug, Clone, Default)]
pub struct ComposeRequest {
    pub erts_version: String,
    pub area: Option<String>,
    pub side: Option<SideArg>,
    pub name: Option<String>,
    pub vsn: Option<String>,
    pub file: bool,
}

/// Which fixed-form suffix to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixedForm {
    DotApp,
    DotRel,
}

/// Build the suffix for a `compose` request.
///
/// The result is decomposed again with `parser` so that invalid components
/// are reported with the grammar's error rather than producing a suffix the
/// repository would reject.
pub fn build(
    parser: &SuffixParser<'_>,
    request: &ComposeRequest,
    default_area: &str,
) -> Result<String, CliError> {
    let area = request
        .area
        .clone()
        .unwrap_or_else(|| default_area.to_string());
    single_token("erts version", &request.erts_version)?;
    single_token("area", &area)?;
    for (what, value) in [("name", &request.name), ("vsn", &request.vsn)] {
        if let Some(value) = value {
            single_token(what, value)?;
        }
    }
    let is_meta = area == META_AREA;

    if request.name.is_some() && request.side.is_none() && !is_meta {
        return Err(CliError::Usage(format!(
            "--side is required for packages in area '{}'",
            area
        )));
    }
    if request.vsn.is_some() && request.name.is_none() {
        return Err(CliError::Usage("--vsn requires --name".to_string()));
    }
    if request.file && request.vsn.is_none() {
        return Err(CliError::Usage("--file requires --name and --vsn".to_string()));
    }

    let package_file = if request.file {
        request
            .name
            .as_ref()
            .map(|name| format!("{}.{}", name, PACKAGE_ARCHIVE_EXT))
    } else {
        None
    };

    let components = SuffixComponents {
        erts_version: request.erts_version.clone(),
        area: Some(area),
        side: request.side.map(Side::from),
        package_name: request.name.clone(),
        package_vsn: request.vsn.clone(),
        package_file,
    };

    let suffix = compose(&components);
    verify(parser, &suffix)?;
    Ok(suffix)
}

/// Build the `.app` or `.rel` descriptor suffix.
pub fn build_fixed(
    parser: &SuffixParser<'_>,
    form: FixedForm,
    erts_version: &str,
    name: &str,
    vsn: &str,
) -> Result<String, CliError> {
    single_token("erts version", erts_version)?;
    single_token("name", name)?;
    single_token("vsn", vsn)?;
    let suffix = match form {
        FixedForm::DotApp => dot_app_file_suffix(erts_version, name, vsn),
        FixedForm::DotRel => dot_rel_file_suffix(erts_version, name, vsn),
    };
    verify(parser, &suffix)?;
    Ok(suffix)
}

/// Build the runtime archive suffix for an area.
///
/// The runtime archive sits where a side would be, so it is not
/// decomposable; only the version and area are checked.
pub fn build_erts(
    parser: &SuffixParser<'_>,
    erts_version: &str,
    area: &str,
) -> Result<String, CliError> {
    single_token("erts version", erts_version)?;
    single_token("area", area)?;
    verify(parser, &format!("{}/{}", erts_version, area))?;
    Ok(erts_package_suffix(erts_version, area))
}

/// Each component must be exactly one path token.
fn single_token(what: &str, value: &str) -> Result<(), CliError> {
    if value.is_empty() || value.contains(SEPARATOR) {
        return Err(CliError::Usage(format!(
            "{} '{}' is not a single path token",
            what, value
        )));
    }
    Ok(())
}

fn verify(parser: &SuffixParser<'_>, suffix: &str) -> Result<(), CliError> {
    parser.decompose(suffix)?;
    tracing::debug!(suffix, "composed suffix");
    Ok(())
}
