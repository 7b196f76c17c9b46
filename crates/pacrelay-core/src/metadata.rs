//! Rendering of the per-package database members.
//!
//! `desc` is a list of `%TAG%` lines each followed by its value line, in the
//! fixed order pacman expects, and ends with a blank line. `files` lists the
//! package payload followed by its install paths. `depends` holds the
//! dependency list on its own.

use pacrelay_config::metadata::Metadata;

use crate::package::PackageRecord;

pub const DESC: &str = "desc";
pub const FILES: &str = "files";
pub const DEPENDS: &str = "depends";

#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    metadata: &'a Metadata,
}

impl<'a> Formatter<'a> {
    pub fn new(metadata: &'a Metadata) -> Self {
        Self { metadata }
    }

    pub fn format_description(&self, pkg: &PackageRecord) -> Vec<u8> {
        let m = self.metadata;

        let provides = if pkg.variant.is_default() {
            String::new()
        } else {
            format!("{}={}", pkg.name, pkg.version)
        };

        let depends = m.depends.join("\n");
        let build_date = pkg.build_date().to_string();
        let size = pkg.size.to_string();

        let fields = [
            ("FILENAME", pkg.filename.as_str()),
            ("NAME", pkg.base_name.as_str()),
            ("BASE", pkg.base_name.as_str()),
            ("VERSION", pkg.version.as_str()),
            ("DESC", m.description.as_str()),
            ("GROUPS", m.groups.as_str()),
            ("URL", m.url.as_str()),
            ("LICENSE", m.license.as_str()),
            ("ARCH", pkg.architecture.as_str()),
            ("PROVIDES", provides.as_str()),
            ("DEPENDS", depends.as_str()),
            ("OPTDEPENDS", m.optdepends.as_str()),
            ("CONFLICTS", m.conflicts.as_str()),
            ("REPLACES", m.replaces.as_str()),
            ("BUILDDATE", build_date.as_str()),
            ("PACKAGER", m.packager.as_str()),
            ("SIZE", size.as_str()),
        ];

        let mut out: String = fields
            .iter()
            .map(|(tag, value)| format!("%{tag}%\n{value}\n"))
            .collect();
        out.push('\n');
        out.into_bytes()
    }

    pub fn format_file_list(&self, pkg: &PackageRecord) -> Vec<u8> {
        let m = self.metadata;
        let version = pkg.dotted_version(m.version_separator);

        let mut lines = vec![format!(".{}", pkg.filename)];
        let templates = m.files.iter().chain(
            m.default_files
                .iter()
                .filter(|_| pkg.variant.is_default()),
        );
        lines.extend(templates.map(|t| {
            t.replace("{version}", &version)
                .replace("{name}", &pkg.base_name)
        }));

        let mut out = lines.join("\n");
        out.push('\n');
        out.into_bytes()
    }

    pub fn format_depends(&self, _pkg: &PackageRecord) -> Vec<u8> {
        let mut out = String::from("%DEPENDS%\n");
        for dep in &self.metadata.depends {
            out.push_str(dep);
            out.push('\n');
        }
        out.into_bytes()
    }

    pub fn has_depends(&self) -> bool {
        !self.metadata.depends.is_empty()
    }
}
