use miette::Report;
use stratus_testkit::{CheckError, LoadError};

pub(crate) const CONNECT_CONTEXT: &str = "while opening the catalog";
pub(crate) const STATEMENT_CONTEXT: &str = "while running statement";
pub(crate) const SHOW_CONTEXT: &str = "while listing objects";
pub(crate) const IDENTIFIER_CONTEXT: &str = "while reading the object identifier";
const LOAD_CONTEXT: &str = "while loading scenarios";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    Core {
        context: &'static str,
        source: stratus_core::Error,
    },
    Load(LoadError),
    Check(CheckError),
    ScenariosFailed {
        failed: usize,
        total: usize,
    },
}

impl CliError {
    pub(crate) fn core(context: &'static str) -> impl FnOnce(stratus_core::Error) -> Self {
        move |source| Self::Core { context, source }
    }
}

impl From<LoadError> for CliError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<CheckError> for CliError {
    fn from(value: CheckError) -> Self {
        Self::Check(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::Core { context, source } => {
            let category = core_category(&source);
            let report = report_with_context(source, context);
            format!("[{category}] {report}")
        }
        CliError::Load(source) => {
            let category = match &source {
                LoadError::Read { .. } => "io",
                LoadError::Parse { .. } => "parse",
            };
            let report = report_with_context(source, LOAD_CONTEXT);
            format!("[{category}] {report}")
        }
        CliError::Check(source) => format!("[check] {}", Report::msg(source.to_string())),
        CliError::ScenariosFailed { failed, total } => {
            format!("[scenario] {failed} of {total} scenario(s) failed")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let anyhow_error = anyhow::Error::new(source).context(context.into());
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &stratus_core::Error) -> &'static str {
    match error {
        stratus_core::Error::Identifier(_) => "identifier",
        stratus_core::Error::Request(_) => "request",
        stratus_core::Error::Execute(_) => "execute",
        stratus_core::Error::Decode(_) => "decode",
        stratus_core::Error::ObjectNotFound { .. } => "not-found",
    }
}

#[cfg(test)]
mod tests {
    use stratus_core::{Error, IdentifierError, ObjectType};

    use super::{CliError, STATEMENT_CONTEXT, render_runtime_error};

    #[test]
    fn core_errors_keep_category_and_context() {
        let rendered = render_runtime_error(CliError::core(STATEMENT_CONTEXT)(
            Error::object_not_found(ObjectType::Role, r#""R""#),
        ));

        assert_eq!(
            rendered,
            r#"[not-found] while running statement: role "R" does not exist or not authorized"#
        );
    }

    #[test]
    fn identifier_errors_are_categorized() {
        let rendered = render_runtime_error(CliError::core(STATEMENT_CONTEXT)(
            IdentifierError::Empty.into(),
        ));

        assert!(rendered.starts_with("[identifier] "), "got: {rendered}");
    }
}
