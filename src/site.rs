//! Page generation and static asset deployment around the converter.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::convert::markdown_to_html_node;
use crate::error::{Error, Result};
use crate::parser::extract_title;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// What a full build produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub assets: usize,
}

/// Substitute the title and rendered content into a page template.
pub fn render_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Render one markdown file through `template` into `dest`.
pub fn generate_page(from: &Path, template: &Path, dest: &Path) -> Result<()> {
    log::info!(
        "Generating page from {} to {} using {}",
        from.display(),
        dest.display(),
        template.display()
    );

    let markdown = read(from)?;
    let template = read(template)?;

    let html = markdown_to_page(&markdown, &template).map_err(|e| e.in_page(from))?;

    if let Some(parent) = dest.parent() {
        create_dir_all(parent)?;
    }
    fs::write(dest, html).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })
}

/// Render every `*.md` below `content_dir` into the same relative location
/// under `dest_dir`, with an `.html` extension. Returns the written pages.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &Path,
    dest_dir: &Path,
) -> Result<Vec<PathBuf>> {
    if !content_dir.is_dir() {
        return Err(Error::MissingDirectory {
            what: "content",
            path: content_dir.to_path_buf(),
        });
    }

    let mut sources = Vec::new();
    collect_markdown(content_dir, &mut sources)?;
    sources.sort();

    let mut pages = Vec::with_capacity(sources.len());
    for source in sources {
        // collect_markdown only yields paths below content_dir
        let relative = source.strip_prefix(content_dir).unwrap_or(&source);
        let dest = dest_dir.join(relative).with_extension("html");
        generate_page(&source, template, &dest)?;
        pages.push(dest);
    }
    Ok(pages)
}

/// Copy `src` into `dst` recursively, creating directories as needed.
/// Returns the number of files copied. A missing `src` copies nothing.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    if !src.exists() {
        return Ok(0);
    }
    create_dir_all(dst)?;

    let mut copied = 0;
    for entry in read_dir(src)? {
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            log::debug!("Creating directory: {}", to.display());
            copied += copy_dir_recursive(&from, &to)?;
        } else {
            log::debug!("Copying: {} -> {}", from.display(), to.display());
            fs::copy(&from, &to).map_err(|source| Error::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Replace `public_dir` with a fresh copy of `static_dir`.
pub fn deploy_static(static_dir: &Path, public_dir: &Path) -> Result<usize> {
    if !static_dir.is_dir() {
        return Err(Error::MissingDirectory {
            what: "static",
            path: static_dir.to_path_buf(),
        });
    }

    if public_dir.exists() {
        log::info!("Removing existing public directory: {}", public_dir.display());
        fs::remove_dir_all(public_dir).map_err(|source| Error::Remove {
            path: public_dir.to_path_buf(),
            source,
        })?;
    }

    log::info!(
        "Copying static files from {} to {}",
        static_dir.display(),
        public_dir.display()
    );
    copy_dir_recursive(static_dir, public_dir)
}

/// Deploy static assets, then generate every page of the site under `root`.
pub fn build_site(root: &Path, config: &Config) -> Result<BuildReport> {
    let paths = config.resolve(root);
    let assets = deploy_static(&paths.static_dir, &paths.public_dir)?;
    let pages = generate_pages_recursive(&paths.content_dir, &paths.template, &paths.public_dir)?;
    Ok(BuildReport { pages, assets })
}

fn markdown_to_page(markdown: &str, template: &str) -> Result<String> {
    let content = markdown_to_html_node(markdown)?.to_html();
    let title = extract_title(markdown)?;
    Ok(render_template(template, title, &content))
}

fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in read_dir(dir)? {
        let path = entry.path();
        if path.is_dir() {
            collect_markdown(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            out.push(path);
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_dir(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    entries
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|source| Error::Read {
            path: dir.to_path_buf(),
            source,
        })
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<title>{{ Title }}</title><body>{{ Content }}</body>";

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "template.html", TEMPLATE);
        write(root, "static/index.css", "body {}");
        write(root, "static/images/logo.png", "png");
        write(root, "content/index.md", "# Home\n\nWelcome **in**");
        write(root, "content/blog/post.md", "# Post\n\n- one\n- two");
        write(root, "content/notes.txt", "not markdown");
        dir
    }

    #[test]
    fn template_substitution() {
        assert_eq!(
            render_template("{{ Title }}|{{ Content }}|{{ Title }}", "T", "<p>c</p>"),
            "T|<p>c</p>|T"
        );
    }

    #[test]
    fn generates_one_page() {
        let dir = site();
        let root = dir.path();
        let dest = root.join("out/nested/index.html");

        generate_page(
            &root.join("content/index.md"),
            &root.join("template.html"),
            &dest,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dest).unwrap(),
            "<title>Home</title><body><div><h1>Home</h1><p>Welcome <b>in</b></p></div></body>"
        );
    }

    #[test]
    fn page_errors_name_the_source_file() {
        let dir = site();
        let root = dir.path();
        write(root, "content/untitled.md", "no heading here");

        let err = generate_page(
            &root.join("content/untitled.md"),
            &root.join("template.html"),
            &root.join("out.html"),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Page { .. }));
        assert!(err.to_string().contains("untitled.md"));
        assert!(!root.join("out.html").exists());
    }

    #[test]
    fn generates_pages_recursively() {
        let dir = site();
        let root = dir.path();
        let out = root.join("public");

        let pages = generate_pages_recursive(
            &root.join("content"),
            &root.join("template.html"),
            &out,
        )
        .unwrap();

        assert_eq!(
            pages,
            vec![out.join("blog/post.html"), out.join("index.html")]
        );
        assert_eq!(
            fs::read_to_string(out.join("blog/post.html")).unwrap(),
            "<title>Post</title><body><div><h1>Post</h1><ul><li>one</li><li>two</li></ul></div></body>"
        );
        assert!(!out.join("notes.html").exists());
    }

    #[test]
    fn missing_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_pages_recursive(
            &dir.path().join("content"),
            &dir.path().join("template.html"),
            &dir.path().join("public"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingDirectory { what: "content", .. }));
    }

    #[test]
    fn deploy_replaces_public_dir() {
        let dir = site();
        let root = dir.path();
        write(root, "public/stale.html", "old");

        let copied = deploy_static(&root.join("static"), &root.join("public")).unwrap();

        assert_eq!(copied, 2);
        assert!(!root.join("public/stale.html").exists());
        assert_eq!(
            fs::read_to_string(root.join("public/images/logo.png")).unwrap(),
            "png"
        );
    }

    #[test]
    fn deploy_requires_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = deploy_static(&dir.path().join("static"), &dir.path().join("public"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingDirectory { what: "static", .. }));
    }

    #[test]
    fn builds_whole_site() {
        let dir = site();
        let root = dir.path();

        let report = build_site(root, &Config::default()).unwrap();

        assert_eq!(report.assets, 2);
        assert_eq!(report.pages.len(), 2);
        assert!(root.join("public/index.css").exists());
        assert!(root.join("public/index.html").exists());
        assert!(root.join("public/blog/post.html").exists());
    }
}
