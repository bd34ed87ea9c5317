use std::path::Path;

/// How a file is transformed, decided purely by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Html,
    Css,
    Js,
    Passthrough,
}

impl AssetKind {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("html") => Self::Html,
            Some("css") => Self::Css,
            Some("js") => Self::Js,
            _ => Self::Passthrough,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRow {
    pub name: String,
    pub origin: u64,
    pub minified: u64,
    pub brotli: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(AssetKind::from_path(Path::new("index.html")), AssetKind::Html);
        assert_eq!(AssetKind::from_path(Path::new("dist/app.css")), AssetKind::Css);
        assert_eq!(AssetKind::from_path(Path::new("app-3f2a.js")), AssetKind::Js);
        assert_eq!(
            AssetKind::from_path(Path::new("app_bg.wasm")),
            AssetKind::Passthrough
        );
    }

    #[test]
    fn test_kind_edge_cases() {
        // Matching is exact, like a plain extension switch
        assert_eq!(AssetKind::from_path(Path::new("INDEX.HTML")), AssetKind::Passthrough);
        assert_eq!(AssetKind::from_path(Path::new("Makefile")), AssetKind::Passthrough);
        assert_eq!(AssetKind::from_path(Path::new(".js")), AssetKind::Passthrough);
        assert_eq!(AssetKind::from_path(Path::new("bundle.min.js")), AssetKind::Js);
    }
}
