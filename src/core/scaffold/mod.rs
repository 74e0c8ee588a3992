//! The `new` pipeline: a fixed, ordered step list that scaffolds a
//! Python package project.
//!
//! Steps before the clone mutate no durable state and need no
//! compensation. Every step after the clone writes only inside the
//! cloned repository root, so a single compensation (deleting that
//! root) is sufficient to undo any subset of them.

pub mod templates;

use crate::context::{CiProvider, ProjectContext};
use crate::core::local_files::{local, FileSystem};
use crate::core::slugify::slugify_package_name;
use crate::error::{Error, Result};
use crate::pipeline::{Step, StepRegistry};
use crate::prompt::{PromptEngine, SelectOption, SelectPrompt, TextPrompt, YesNoPrompt};
use crate::template::{render, render_strict, TemplateVars};
use crate::{git, tty, venv};

/// Answers seeded from CLI flags. Anything left `None` is prompted for
/// interactively; in non-interactive mode, missing required answers
/// fail the prompt step.
#[derive(Debug, Default)]
pub struct Answers {
    pub name: Option<String>,
    pub description: Option<String>,
    pub git_ssh_url: Option<String>,
    pub git_https_url: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub tags: Option<String>,
    /// `None` = ask; `Some(None)` = explicitly no CI.
    pub ci: Option<Option<CiProvider>>,
    pub with_tests: Option<bool>,
    pub with_venv: Option<bool>,
}

/// Build the ordered step list for the `new` pipeline.
pub fn build_steps(engine: PromptEngine, seed: Answers) -> Result<StepRegistry<ProjectContext>> {
    let steps = vec![
        Step::new(0, "Collecting project details", move |ctx| {
            collect_answers(ctx, &engine, &seed)
        })
        .with_before_hook(|_| tty::status(""))
        .with_after_hook(|_| tty::status("")),
        // No compensation: a failed or partial clone is a documented
        // gap, not cleaned up by this run.
        Step::new(1, "Cloning the project repository", clone_project),
        Step::new(2, "Writing setup.py", write_setup_py)
            .with_compensation(ProjectContext::remove_project_root),
        Step::new(3, "Writing requirements.txt", write_requirements)
            .with_compensation(ProjectContext::remove_project_root),
        Step::new(4, "Writing CI configuration", write_ci_config)
            .with_guard(|ctx| ctx.use_ci)
            .with_compensation(ProjectContext::remove_project_root),
        Step::new(5, "Creating package directory", create_package_dir)
            .with_compensation(ProjectContext::remove_project_root),
        Step::new(6, "Writing __init__.py", write_init_py)
            .with_compensation(ProjectContext::remove_project_root),
        Step::new(7, "Writing cli.py", write_cli_py)
            .with_compensation(ProjectContext::remove_project_root),
        Step::new(8, "Writing test module", write_test_module)
            .with_guard(|ctx| ctx.with_tests)
            .with_compensation(ProjectContext::remove_project_root),
        Step::new(9, "Provisioning virtualenv", provision_venv)
            .with_guard(|ctx| ctx.with_venv)
            .with_compensation(ProjectContext::remove_project_root)
            .with_after_hook(|_| tty::status("")),
    ];

    StepRegistry::new(steps)
}

fn collect_answers(
    ctx: &mut ProjectContext,
    engine: &PromptEngine,
    seed: &Answers,
) -> Result<()> {
    let mut missing: Vec<String> = Vec::new();

    let name = resolve(engine, &seed.name, "Enter project name", "--name", &mut missing);
    let description = resolve(
        engine,
        &seed.description,
        "Enter project description",
        "--description",
        &mut missing,
    );
    let ssh_url = resolve(
        engine,
        &seed.git_ssh_url,
        "Enter project GitHub url (ssh)",
        "--ssh-url",
        &mut missing,
    );
    let https_url = resolve(
        engine,
        &seed.git_https_url,
        "Enter project GitHub url (https)",
        "--https-url",
        &mut missing,
    );
    let author_name = resolve(
        engine,
        &seed.author_name,
        "Enter project author name",
        "--author",
        &mut missing,
    );
    let author_email = resolve(
        engine,
        &seed.author_email,
        "Enter project author e-mail",
        "--email",
        &mut missing,
    );

    if !missing.is_empty() {
        return Err(Error::validation_missing_argument(missing)
            .with_hint("Provide the missing values as flags or run in an interactive terminal"));
    }

    ctx.project_name = slugify_package_name(&name.unwrap_or_default(), "name")?;
    ctx.project_description = description.unwrap_or_default();
    ctx.git_ssh_url = ssh_url.unwrap_or_default();
    ctx.git_https_url = https_url.unwrap_or_default();
    ctx.author_name = author_name.unwrap_or_default();
    ctx.author_email = author_email.unwrap_or_default();

    ctx.project_tags = match &seed.tags {
        Some(tags) => tags.clone(),
        None => engine
            .text(&TextPrompt {
                question: "Enter project tags".to_string(),
                default: Some(String::new()),
            })
            .unwrap_or_default(),
    };

    ctx.ci_provider = match &seed.ci {
        Some(choice) => *choice,
        None => ask_ci_provider(engine),
    };
    ctx.use_ci = ctx.ci_provider.is_some();

    ctx.with_tests = seed.with_tests.unwrap_or_else(|| {
        engine.yes_no(&YesNoPrompt {
            question: "Generate a test module?".to_string(),
            default: true,
        })
    });

    ctx.with_venv = match seed.with_venv {
        Some(v) => v,
        // Provisioning shells out to python3/pip; only do it unprompted
        // when the operator asked for it.
        None if !engine.is_interactive() => false,
        None => engine.yes_no(&YesNoPrompt {
            question: "Provision a virtualenv (.venv)?".to_string(),
            default: true,
        }),
    };

    Ok(())
}

fn resolve(
    engine: &PromptEngine,
    seeded: &Option<String>,
    question: &str,
    flag: &str,
    missing: &mut Vec<String>,
) -> Option<String> {
    let value = match seeded {
        Some(v) => Some(v.clone()),
        None => engine.text(&TextPrompt {
            question: question.to_string(),
            default: None,
        }),
    };

    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(flag.to_string());
            None
        }
    }
}

fn ask_ci_provider(engine: &PromptEngine) -> Option<CiProvider> {
    if !engine.is_interactive() {
        return None;
    }

    let wants_ci = engine.yes_no(&YesNoPrompt {
        question: "Add CI configuration?".to_string(),
        default: true,
    });
    if !wants_ci {
        return None;
    }

    engine
        .select(&SelectPrompt {
            question: "Choose a CI provider".to_string(),
            options: vec![
                SelectOption {
                    value: CiProvider::Travis.as_str().to_string(),
                    label: "Travis CI".to_string(),
                },
                SelectOption {
                    value: CiProvider::GithubActions.as_str().to_string(),
                    label: "GitHub Actions".to_string(),
                },
            ],
            default_index: Some(1),
        })
        .and_then(|v| CiProvider::parse(&v).ok())
}

pub(crate) fn clone_project(ctx: &mut ProjectContext) -> Result<()> {
    let repo_name = git::repo_dir_name(&ctx.git_ssh_url)?;
    let target = ctx.destination_path.join(&repo_name);

    if target.exists() {
        return Err(Error::validation_invalid_argument(
            "destination_path",
            format!(
                "Destination already contains a directory named '{}'",
                repo_name
            ),
            Some(target.to_string_lossy().to_string()),
            None,
        )
        .with_hint("Remove the directory or scaffold into a different destination"));
    }

    git::clone_repo(&ctx.git_ssh_url, &target)?;
    // Only set after a successful clone so the rollback never touches a
    // directory this run did not create.
    ctx.project_root = Some(target);
    Ok(())
}

fn template_vars(ctx: &ProjectContext) -> Vec<(&'static str, &str)> {
    vec![
        (TemplateVars::PROJECT_NAME, ctx.project_name.as_str()),
        (
            TemplateVars::PROJECT_DESCRIPTION,
            ctx.project_description.as_str(),
        ),
        (TemplateVars::PROJECT_GITHUB_URL, ctx.git_https_url.as_str()),
        (TemplateVars::PROJECT_TAGS, ctx.project_tags.as_str()),
        (TemplateVars::AUTHOR_NAME, ctx.author_name.as_str()),
        (TemplateVars::AUTHOR_EMAIL, ctx.author_email.as_str()),
    ]
}

pub(crate) fn write_setup_py(ctx: &mut ProjectContext) -> Result<()> {
    let rendered = render_strict(templates::SETUP_PY, &template_vars(ctx))?;
    let path = ctx.require_project_root()?.join(templates::SETUP_PY_FILE);
    local().write(&path, &rendered)?;
    ctx.record_artifact(templates::SETUP_PY_FILE);
    Ok(())
}

pub(crate) fn write_requirements(ctx: &mut ProjectContext) -> Result<()> {
    let path = ctx
        .require_project_root()?
        .join(templates::REQUIREMENTS_FILE);
    local().write(&path, templates::REQUIREMENTS_TXT)?;
    ctx.record_artifact(templates::REQUIREMENTS_FILE);
    Ok(())
}

pub(crate) fn write_ci_config(ctx: &mut ProjectContext) -> Result<()> {
    let provider = ctx
        .ci_provider
        .ok_or_else(|| Error::internal_unexpected("CI step ran without a provider"))?;
    let root = ctx.require_project_root()?.to_path_buf();
    let fs = local();

    match provider {
        CiProvider::Travis => {
            fs.write(&root.join(templates::TRAVIS_FILE), templates::TRAVIS_YML)?;
            ctx.record_artifact(templates::TRAVIS_FILE);
        }
        CiProvider::GithubActions => {
            let rendered = render(
                templates::GITHUB_ACTIONS_YML,
                &[(TemplateVars::PROJECT_NAME, ctx.project_name.as_str())],
            );
            let workflow_dir = root.join(templates::GITHUB_WORKFLOW_DIR);
            fs.ensure_dir(&workflow_dir)?;
            fs.write(&workflow_dir.join(templates::GITHUB_WORKFLOW_FILE), &rendered)?;
            ctx.record_artifact(format!(
                "{}/{}",
                templates::GITHUB_WORKFLOW_DIR,
                templates::GITHUB_WORKFLOW_FILE
            ));
        }
    }

    Ok(())
}

pub(crate) fn create_package_dir(ctx: &mut ProjectContext) -> Result<()> {
    let package_dir = ctx.require_project_root()?.join(&ctx.project_name);
    local().ensure_dir(&package_dir)?;
    let artifact = format!("{}/", ctx.project_name);
    ctx.package_dir = Some(package_dir);
    ctx.record_artifact(artifact);
    Ok(())
}

pub(crate) fn write_init_py(ctx: &mut ProjectContext) -> Result<()> {
    let path = ctx.require_package_dir()?.join(templates::INIT_FILE);
    local().write(&path, "")?;
    let artifact = format!("{}/{}", ctx.project_name, templates::INIT_FILE);
    ctx.record_artifact(artifact);
    Ok(())
}

pub(crate) fn write_cli_py(ctx: &mut ProjectContext) -> Result<()> {
    let rendered = render_strict(templates::CLI_PY, &template_vars(ctx))?;
    let path = ctx.require_package_dir()?.join(templates::CLI_FILE);
    local().write(&path, &rendered)?;
    let artifact = format!("{}/{}", ctx.project_name, templates::CLI_FILE);
    ctx.record_artifact(artifact);
    Ok(())
}

pub(crate) fn write_test_module(ctx: &mut ProjectContext) -> Result<()> {
    let rendered = render_strict(templates::TEST_CLI_PY, &template_vars(ctx))?;
    let tests_dir = ctx.require_project_root()?.join(templates::TESTS_DIR);
    let fs = local();
    fs.ensure_dir(&tests_dir)?;
    fs.write(&tests_dir.join(templates::TEST_FILE), &rendered)?;
    ctx.record_artifact(format!("{}/{}", templates::TESTS_DIR, templates::TEST_FILE));
    Ok(())
}

pub(crate) fn provision_venv(ctx: &mut ProjectContext) -> Result<()> {
    let root = ctx.require_project_root()?.to_path_buf();
    let activation = venv::provision(&root)?;
    ctx.venv_activation = Some(activation);
    ctx.record_artifact(format!("{}/", venv::VENV_DIR));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn ctx_with_root(root: PathBuf) -> ProjectContext {
        let mut ctx = ProjectContext::new(root.parent().unwrap().to_path_buf());
        ctx.project_name = "demo_pkg".to_string();
        ctx.project_description = "A demo package".to_string();
        ctx.git_ssh_url = "git@github.com:acme/demo-pkg.git".to_string();
        ctx.git_https_url = "https://github.com/acme/demo-pkg".to_string();
        ctx.author_name = "Jo Developer".to_string();
        ctx.author_email = "jo@example.com".to_string();
        ctx.project_tags = "demo cli".to_string();
        std::fs::create_dir_all(&root).unwrap();
        ctx.project_root = Some(root);
        ctx
    }

    #[test]
    fn registry_has_ten_uniquely_ordered_steps() {
        let registry = build_steps(PromptEngine::non_interactive(), Answers::default()).unwrap();
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn collect_answers_fails_listing_missing_flags_when_non_interactive() {
        let mut ctx = ProjectContext::new(PathBuf::from("/tmp"));
        let engine = PromptEngine::non_interactive();
        let seed = Answers {
            name: Some("demo".to_string()),
            ..Answers::default()
        };

        let err = collect_answers(&mut ctx, &engine, &seed).err().unwrap();
        assert_eq!(err.code, crate::ErrorCode::ValidationMissingArgument);
        let args = err.details["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--description"));
        assert!(!args.iter().any(|a| a == "--name"));
    }

    #[test]
    fn collect_answers_non_interactive_defaults() {
        let mut ctx = ProjectContext::new(PathBuf::from("/tmp"));
        let engine = PromptEngine::non_interactive();
        let seed = Answers {
            name: Some("Demo Pkg".to_string()),
            description: Some("A demo".to_string()),
            git_ssh_url: Some("git@github.com:acme/demo.git".to_string()),
            git_https_url: Some("https://github.com/acme/demo".to_string()),
            author_name: Some("Jo".to_string()),
            author_email: Some("jo@example.com".to_string()),
            ..Answers::default()
        };

        collect_answers(&mut ctx, &engine, &seed).unwrap();

        assert_eq!(ctx.project_name, "demo_pkg");
        assert!(!ctx.use_ci);
        assert!(ctx.ci_provider.is_none());
        assert!(ctx.with_tests);
        assert!(!ctx.with_venv);
        assert_eq!(ctx.project_tags, "");
    }

    #[test]
    fn collect_answers_honors_seeded_flags() {
        let mut ctx = ProjectContext::new(PathBuf::from("/tmp"));
        let engine = PromptEngine::non_interactive();
        let seed = Answers {
            name: Some("demo".to_string()),
            description: Some("A demo".to_string()),
            git_ssh_url: Some("git@github.com:acme/demo.git".to_string()),
            git_https_url: Some("https://github.com/acme/demo".to_string()),
            author_name: Some("Jo".to_string()),
            author_email: Some("jo@example.com".to_string()),
            tags: Some("cli tool".to_string()),
            ci: Some(Some(CiProvider::Travis)),
            with_tests: Some(false),
            with_venv: Some(true),
        };

        collect_answers(&mut ctx, &engine, &seed).unwrap();

        assert!(ctx.use_ci);
        assert_eq!(ctx.ci_provider, Some(CiProvider::Travis));
        assert!(!ctx.with_tests);
        assert!(ctx.with_venv);
        assert_eq!(ctx.project_tags, "cli tool");
    }

    #[test]
    fn clone_step_fails_when_directory_already_exists() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("demo-pkg");
        std::fs::create_dir_all(&existing).unwrap();

        let mut ctx = ProjectContext::new(dir.path().to_path_buf());
        ctx.git_ssh_url = "git@github.com:acme/demo-pkg.git".to_string();

        let err = clone_project(&mut ctx).err().unwrap();
        assert_eq!(err.code, crate::ErrorCode::ValidationInvalidArgument);
        // No compensation target: the root was never set, and the
        // pre-existing directory is untouched.
        assert!(ctx.project_root.is_none());
        assert!(existing.exists());
    }

    #[test]
    fn write_setup_py_renders_all_placeholders() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_with_root(dir.path().join("demo-pkg"));

        write_setup_py(&mut ctx).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("demo-pkg").join("setup.py")).unwrap();
        assert!(content.contains("name='demo_pkg'"));
        assert!(content.contains("author='Jo Developer'"));
        assert!(content.contains("url='https://github.com/acme/demo-pkg'"));
        assert!(!content.contains("{{"));
        assert_eq!(ctx.artifacts, vec!["setup.py"]);
    }

    #[test]
    fn write_requirements_writes_dependency_list() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_with_root(dir.path().join("demo-pkg"));

        write_requirements(&mut ctx).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("demo-pkg").join("requirements.txt")).unwrap();
        assert!(content.contains("click"));
    }

    #[test]
    fn travis_config_is_written_verbatim() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_with_root(dir.path().join("demo-pkg"));
        ctx.use_ci = true;
        ctx.ci_provider = Some(CiProvider::Travis);

        write_ci_config(&mut ctx).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("demo-pkg").join(".travis.yml")).unwrap();
        assert_eq!(content, templates::TRAVIS_YML);
    }

    #[test]
    fn github_workflow_keeps_matrix_expressions_verbatim() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_with_root(dir.path().join("demo-pkg"));
        ctx.use_ci = true;
        ctx.ci_provider = Some(CiProvider::GithubActions);

        write_ci_config(&mut ctx).unwrap();

        let content = std::fs::read_to_string(
            dir.path()
                .join("demo-pkg")
                .join(".github/workflows")
                .join("ci.yml"),
        )
        .unwrap();
        assert!(content.contains("${{ matrix.python-version }}"));
        assert!(content.contains("import demo_pkg"));
        assert!(ctx
            .artifacts
            .iter()
            .any(|a| a == ".github/workflows/ci.yml"));
    }

    #[test]
    fn package_dir_init_and_cli_are_created() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_with_root(dir.path().join("demo-pkg"));

        create_package_dir(&mut ctx).unwrap();
        write_init_py(&mut ctx).unwrap();
        write_cli_py(&mut ctx).unwrap();

        let package_dir = dir.path().join("demo-pkg").join("demo_pkg");
        assert!(package_dir.is_dir());
        assert_eq!(
            std::fs::read_to_string(package_dir.join("__init__.py")).unwrap(),
            ""
        );
        let cli = std::fs::read_to_string(package_dir.join("cli.py")).unwrap();
        assert!(cli.contains("A demo package"));
        assert!(!cli.contains("{{"));
    }

    #[test]
    fn test_module_imports_the_package() {
        let dir = tempdir().unwrap();
        let mut ctx = ctx_with_root(dir.path().join("demo-pkg"));

        write_test_module(&mut ctx).unwrap();

        let content = std::fs::read_to_string(
            dir.path().join("demo-pkg").join("tests").join("test_cli.py"),
        )
        .unwrap();
        assert!(content.contains("from demo_pkg.cli import cli"));
        assert!(!content.contains("{{"));
    }
}
