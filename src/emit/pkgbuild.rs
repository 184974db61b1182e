use crate::config::Maintainer;
use crate::models::{PackageDescriptor, RepositoryKind};

/// Render the `PKGBUILD` for a resolved package.
///
/// The checksum is a placeholder; `updpkgsums` fills it in.
pub fn render(descriptor: &PackageDescriptor, maintainer: &Maintainer) -> String {
    let github = matches!(descriptor.repository, RepositoryKind::GitHub { .. });
    let mut lines: Vec<String> = Vec::new();

    if let Some(reqs) = &descriptor.system_requirements {
        lines.push(format!("# system requirements: {}", reqs));
    }
    if let Some(line) = maintainer_line(maintainer) {
        lines.push(line);
        lines.push(String::new());
    }

    lines.push(format!("_pkgname={}", descriptor.name));
    if github {
        lines.push("pkgname=r-${_pkgname,,}".to_string());
        lines.push(format!(
            "pkgver={}",
            descriptor.version.replace([':', '-'], "")
        ));
    } else {
        lines.push(format!("_pkgver={}", descriptor.version));
        lines.push("pkgname=r-${_pkgname,,}".to_string());
        lines.push("pkgver=${_pkgver//[:-]/.}".to_string());
    }
    lines.push("pkgrel=1".to_string());
    lines.push(pkgdesc_line(&descriptor.title));
    let arch = if descriptor.needs_native_build { "x86_64" } else { "any" };
    lines.push(format!("arch=('{}')", arch));
    lines.push(format!("url=\"{}\"", descriptor.project_url));
    lines.push(format!("license=('{}')", descriptor.license.canonical_id));
    lines.push(array("depends", &descriptor.installable_dependencies()));

    let optdepends = descriptor.installable_optional_dependencies();
    if !optdepends.is_empty() {
        lines.push(array("optdepends", &optdepends));
    }
    if descriptor.fortran_sources {
        lines.push(array("makedepends", &["gcc-fortran".to_string()]));
    }

    lines.push(format!("source=(\"{}\")", descriptor.source_location.template));
    lines.push("sha256sums=('a')".to_string());
    lines.push(String::new());

    let archive_version = if github { "${pkgver}" } else { "${_pkgver}" };
    lines.push("build() {".to_string());
    lines.push(format!(
        "  R CMD INSTALL ${{_pkgname}}_{}.tar.gz -l \"${{srcdir}}\"",
        archive_version
    ));
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push("package() {".to_string());
    lines.push("  install -dm0755 \"${pkgdir}/usr/lib/R/library\"".to_string());
    lines.push(
        "  cp -a --no-preserve=ownership \"${_pkgname}\" \"${pkgdir}/usr/lib/R/library\""
            .to_string(),
    );
    if let Some(file) = &descriptor.license.required_license_file {
        lines.push(format!(
            "  install -Dm644 \"${{_pkgname}}/{}\" -t \"${{pkgdir}}/usr/share/licenses/${{pkgname}}\"",
            file
        ));
    }
    lines.push("}".to_string());
    lines.push("# vim:set ts=2 sw=2 et:".to_string());

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

fn maintainer_line(maintainer: &Maintainer) -> Option<String> {
    match (&maintainer.name, &maintainer.email) {
        (Some(name), Some(email)) => Some(format!("# Maintainer: {} <{}>", name, email)),
        (Some(name), None) => Some(format!("# Maintainer: {}", name)),
        (None, Some(email)) => Some(format!("# Maintainer: <{}>", email)),
        (None, None) => None,
    }
}

/// Single quotes unless the title itself contains one.
fn pkgdesc_line(title: &str) -> String {
    if title.contains('\'') {
        format!("pkgdesc=\"{}\"", title.replace('"', "\\\""))
    } else {
        format!("pkgdesc='{}'", title)
    }
}

fn array(name: &str, items: &[String]) -> String {
    let mut out = format!("{}=(\n", name);
    for item in items {
        out.push_str("  ");
        out.push_str(item);
        out.push('\n');
    }
    out.push(')');
    out
}
