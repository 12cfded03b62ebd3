//! Release note templates.
//!
//! Four templates make up a changelog entry: the main template plus the
//! `header`, `commit` and `footer` partials it includes. They are loaded once
//! at startup, either from a directory or from the copies built into the
//! binary, and rendered with minijinja.

use std::path::{Path, PathBuf};

use minijinja::Environment;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::model::WriterContext;

pub const MAIN_FILE: &str = "template.md.j2";
pub const HEADER_FILE: &str = "header.md.j2";
pub const COMMIT_FILE: &str = "commit.md.j2";
pub const FOOTER_FILE: &str = "footer.md.j2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Templates {
    pub main_template: String,
    pub header_partial: String,
    pub commit_partial: String,
    pub footer_partial: String,
    #[serde(serialize_with = "serialize_source")]
    pub source: Option<PathBuf>,
}

fn serialize_source<S: Serializer>(source: &Option<PathBuf>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match source {
        Some(dir) => serializer.serialize_str(&dir.display().to_string()),
        None => serializer.serialize_str("builtin"),
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Templates {
    /// Templates compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            main_template: include_str!("../../templates/template.md.j2").to_string(),
            header_partial: include_str!("../../templates/header.md.j2").to_string(),
            commit_partial: include_str!("../../templates/commit.md.j2").to_string(),
            footer_partial: include_str!("../../templates/footer.md.j2").to_string(),
            source: None,
        }
    }

    /// Read all four templates from `dir`.
    pub async fn load(dir: &Path) -> Result<Self> {
        let (main_template, header_partial, commit_partial, footer_partial) = tokio::try_join!(
            read_template(dir.join(MAIN_FILE)),
            read_template(dir.join(HEADER_FILE)),
            read_template(dir.join(COMMIT_FILE)),
            read_template(dir.join(FOOTER_FILE)),
        )?;

        Ok(Self {
            main_template,
            header_partial,
            commit_partial,
            footer_partial,
            source: Some(dir.to_path_buf()),
        })
    }

    fn environment(&self) -> Result<Environment<'_>> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_template("header", &self.header_partial)?;
        env.add_template("commit", &self.commit_partial)?;
        env.add_template("footer", &self.footer_partial)?;
        env.add_template("template", &self.main_template)?;
        Ok(env)
    }

    /// Render a release entry.
    pub fn render<G: Serialize>(&self, context: &WriterContext<G>) -> Result<String> {
        let env = self.environment()?;
        Ok(env.get_template("template")?.render(context)?)
    }
}

async fn read_template(path: PathBuf) -> Result<String> {
    tokio::fs::read_to_string(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::TemplateNotFound { path }
        } else {
            Error::Io(e)
        }
    })
}
