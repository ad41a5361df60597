use crate::api::Snippet;
use crate::install::prompt::Prompter;
use crate::utils::error::{SnippetError, SnippetResult};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Where a snippet will be written and whether an existing file may be
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub path: PathBuf,
    pub overwrite: bool,
}

/// Decides the destination of a fetched snippet
pub struct InstallResolver<'a> {
    prompter: &'a dyn Prompter,
    cwd: PathBuf,
}

impl<'a> InstallResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, cwd: impl Into<PathBuf>) -> Self {
        Self {
            prompter,
            cwd: cwd.into(),
        }
    }

    /// Path used when the user does not pick one.
    pub fn default_path(&self, snippet: &Snippet) -> SnippetResult<PathBuf> {
        default_install_path(snippet, &self.cwd)
    }

    /// Resolve the install target. An explicit path is taken as given;
    /// relative ones are anchored at the resolver's working directory.
    pub fn resolve(
        &self,
        snippet: &Snippet,
        explicit: Option<&str>,
        overwrite: bool,
    ) -> SnippetResult<InstallTarget> {
        if let Some(path) = explicit {
            validate_path(path)?;
            return Ok(InstallTarget {
                path: self.cwd.join(path),
                overwrite,
            });
        }

        let default = self.default_path(snippet)?;
        if !self.prompter.is_interactive() {
            debug!(path = %default.display(), "using default install path");
            return Ok(InstallTarget {
                path: default,
                overwrite,
            });
        }

        let question = format!(
            "Default install path is {}. Do you want to change it?",
            default.display()
        );
        if !self.prompter.confirm(&question, false)? {
            return Ok(InstallTarget {
                path: default,
                overwrite,
            });
        }

        loop {
            let entered = self.prompter.input_path("Enter new install path")?;
            match validate_path(&entered) {
                Ok(()) => {
                    return Ok(InstallTarget {
                        path: self.cwd.join(entered.trim()),
                        overwrite,
                    })
                }
                Err(e) => warn!("rejected install path: {}", e),
            }
        }
    }
}

/// `<cwd>/<snippet.path>` or `<cwd>/<Title>.<Language>`
///
/// The declared path comes from the server and always lands under `cwd`:
/// root and prefix components are dropped, and `..` may not climb above it.
pub fn default_install_path(snippet: &Snippet, cwd: &Path) -> SnippetResult<PathBuf> {
    let declared = snippet.path.trim();
    if !declared.is_empty() {
        return Ok(cwd.join(contained(declared)?));
    }

    let language = snippet.language.trim();
    let file_name = if language.is_empty() {
        snippet.title.clone()
    } else {
        format!("{}.{}", snippet.title, language)
    };
    Ok(cwd.join(contained(&file_name)?))
}

fn contained(path: &str) -> SnippetResult<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(SnippetError::PathInvalid(format!(
                        "'{}' points outside the install directory",
                        path
                    )));
                }
            }
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(SnippetError::PathInvalid(format!(
            "'{}' does not name a file",
            path
        )));
    }
    Ok(relative)
}

fn validate_path(path: &str) -> SnippetResult<()> {
    if path.trim().is_empty() {
        return Err(SnippetError::PathInvalid("path cannot be empty".to_string()));
    }
    if path.contains('\0') {
        return Err(SnippetError::PathInvalid(
            "path contains a NUL byte".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::prompt::SilentPrompter;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers from a script, records how often it was asked.
    struct ScriptedPrompter {
        change: SnippetResult<bool>,
        paths: RefCell<VecDeque<SnippetResult<String>>>,
        asked: RefCell<usize>,
    }

    impl ScriptedPrompter {
        fn new(change: SnippetResult<bool>, paths: Vec<SnippetResult<String>>) -> Self {
            Self {
                change,
                paths: RefCell::new(paths.into()),
                asked: RefCell::new(0),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn is_interactive(&self) -> bool {
            true
        }

        fn confirm(&self, _message: &str, _default: bool) -> SnippetResult<bool> {
            *self.asked.borrow_mut() += 1;
            match &self.change {
                Ok(answer) => Ok(*answer),
                Err(_) => Err(SnippetError::UserCancelled),
            }
        }

        fn input_path(&self, _message: &str) -> SnippetResult<String> {
            *self.asked.borrow_mut() += 1;
            self.paths
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(SnippetError::UserCancelled))
        }
    }

    fn snippet(title: &str, language: &str, path: &str) -> Snippet {
        Snippet {
            id: "abc123".to_string(),
            title: title.to_string(),
            language: language.to_string(),
            path: path.to_string(),
            code: "package main".to_string(),
            ..Snippet::default()
        }
    }

    #[test]
    fn test_default_from_title_and_language() {
        let resolver = InstallResolver::new(&SilentPrompter, "/work");
        let target = resolver.resolve(&snippet("Foo", "go", ""), None, false).unwrap();
        assert_eq!(target.path, PathBuf::from("/work/Foo.go"));
        assert!(!target.overwrite);
    }

    #[test]
    fn test_default_from_declared_path() {
        let resolver = InstallResolver::new(&SilentPrompter, "/work");
        let target = resolver
            .resolve(&snippet("Button", "tsx", "components/ui/button.tsx"), None, true)
            .unwrap();
        assert_eq!(target.path, PathBuf::from("/work/components/ui/button.tsx"));
        assert!(target.overwrite);
    }

    #[test]
    fn test_explicit_path_skips_prompting() {
        let prompter = ScriptedPrompter::new(Ok(true), vec![]);
        let resolver = InstallResolver::new(&prompter, "/work");
        let target = resolver
            .resolve(&snippet("Foo", "go", ""), Some("./out.go"), false)
            .unwrap();
        assert_eq!(target.path, PathBuf::from("/work/out.go"));
        assert_eq!(*prompter.asked.borrow(), 0);
    }

    #[test]
    fn test_explicit_empty_path_is_invalid() {
        let resolver = InstallResolver::new(&SilentPrompter, "/work");
        let result = resolver.resolve(&snippet("Foo", "go", ""), Some("  "), false);
        assert!(matches!(result, Err(SnippetError::PathInvalid(_))));
    }

    #[test]
    fn test_interactive_decline_keeps_default() {
        let prompter = ScriptedPrompter::new(Ok(false), vec![]);
        let resolver = InstallResolver::new(&prompter, "/work");
        let target = resolver.resolve(&snippet("Foo", "go", ""), None, false).unwrap();
        assert_eq!(target.path, PathBuf::from("/work/Foo.go"));
        assert_eq!(*prompter.asked.borrow(), 1);
    }

    #[test]
    fn test_interactive_override_reprompts_on_empty() {
        let prompter = ScriptedPrompter::new(
            Ok(true),
            vec![Ok("".to_string()), Ok("src/main.go".to_string())],
        );
        let resolver = InstallResolver::new(&prompter, "/work");
        let target = resolver.resolve(&snippet("Foo", "go", ""), None, false).unwrap();
        assert_eq!(target.path, PathBuf::from("/work/src/main.go"));
        assert_eq!(*prompter.asked.borrow(), 3);
    }

    #[test]
    fn test_cancel_aborts() {
        let prompter = ScriptedPrompter::new(Err(SnippetError::UserCancelled), vec![]);
        let resolver = InstallResolver::new(&prompter, "/work");
        let result = resolver.resolve(&snippet("Foo", "go", ""), None, false);
        assert!(matches!(result, Err(SnippetError::UserCancelled)));
    }

    #[test]
    fn test_cancel_during_path_entry_aborts() {
        let prompter = ScriptedPrompter::new(Ok(true), vec![Err(SnippetError::UserCancelled)]);
        let resolver = InstallResolver::new(&prompter, "/work");
        let result = resolver.resolve(&snippet("Foo", "go", ""), None, false);
        assert!(matches!(result, Err(SnippetError::UserCancelled)));
    }

    #[test]
    fn test_title_without_language() {
        let path = default_install_path(&snippet("Makefile", "", ""), Path::new("/work")).unwrap();
        assert_eq!(path, PathBuf::from("/work/Makefile"));
    }

    #[test]
    fn test_absolute_declared_path_stays_under_cwd() {
        let resolver = InstallResolver::new(&SilentPrompter, "/work");
        let target = resolver
            .resolve(&snippet("Foo", "go", "/abs/x.go"), None, false)
            .unwrap();
        assert_eq!(target.path, PathBuf::from("/work/abs/x.go"));
        assert!(target.path.starts_with("/work"));
    }

    #[test]
    fn test_declared_path_climbing_out_is_invalid() {
        let resolver = InstallResolver::new(&SilentPrompter, "/work");
        for declared in ["../../x", "a/../../x", ".."] {
            let result = resolver.resolve(&snippet("Foo", "go", declared), None, false);
            assert!(
                matches!(result, Err(SnippetError::PathInvalid(_))),
                "{} was accepted",
                declared
            );
        }
    }

    #[test]
    fn test_declared_path_with_inner_parent_is_normalized() {
        let path =
            default_install_path(&snippet("Foo", "go", "./lib/../src/x.go"), Path::new("/work"))
                .unwrap();
        assert_eq!(path, PathBuf::from("/work/src/x.go"));
    }

    #[test]
    fn test_explicit_absolute_path_is_kept() {
        let resolver = InstallResolver::new(&SilentPrompter, "/work");
        let target = resolver
            .resolve(&snippet("Foo", "go", ""), Some("/elsewhere/out.go"), false)
            .unwrap();
        assert_eq!(target.path, PathBuf::from("/elsewhere/out.go"));
    }
}
