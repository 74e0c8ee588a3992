use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use sprout::context::{CiProvider, ProjectContext};
use sprout::pipeline::{PipelineRunner, RunReport};
use sprout::prompt::PromptEngine;
use sprout::scaffold::{self, Answers};
use sprout::Error;

use super::CmdResult;

#[derive(Args)]
pub struct NewArgs {
    /// Existing directory the project is scaffolded into
    pub destination_path: String,

    /// Project name (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Git remote to clone (ssh)
    #[arg(long = "ssh-url")]
    pub ssh_url: Option<String>,

    /// Git remote for generated links (https)
    #[arg(long = "https-url")]
    pub https_url: Option<String>,

    /// Project author name
    #[arg(long)]
    pub author: Option<String>,

    /// Project author e-mail
    #[arg(long)]
    pub email: Option<String>,

    /// Space-separated project keywords
    #[arg(long)]
    pub tags: Option<String>,

    /// CI provider: travis, github, or none
    #[arg(long)]
    pub ci: Option<String>,

    /// Generate a test module
    #[arg(long, conflicts_with = "skip_tests")]
    pub with_tests: bool,

    #[arg(long)]
    pub skip_tests: bool,

    /// Provision a virtualenv and install the project into it
    #[arg(long, conflicts_with = "skip_venv")]
    pub with_venv: bool,

    #[arg(long)]
    pub skip_venv: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOutput {
    pub command: &'static str,
    pub project: ProjectContext,
    pub report: RunReport,
    pub next_steps: Vec<String>,
}

pub fn run_json(args: NewArgs) -> CmdResult<NewOutput> {
    let destination = resolve_destination(&args.destination_path)?;
    let seed = answers_from(&args)?;

    let mut ctx = ProjectContext::new(destination);
    let registry = scaffold::build_steps(PromptEngine::new(), seed)?;
    let mut runner = PipelineRunner::new(registry);

    let report = runner.run(&mut ctx)?;
    let next_steps = build_next_steps(&ctx);

    Ok((
        NewOutput {
            command: "new",
            project: ctx,
            report,
            next_steps,
        },
        0,
    ))
}

fn resolve_destination(raw: &str) -> sprout::Result<PathBuf> {
    let expanded = shellexpand::tilde(raw);
    let path = PathBuf::from(expanded.as_ref());

    if !path.is_dir() {
        return Err(Error::validation_invalid_argument(
            "destination_path",
            format!("'{}' is not an existing directory", path.display()),
            None,
            None,
        ));
    }

    Ok(path)
}

fn answers_from(args: &NewArgs) -> sprout::Result<Answers> {
    let ci = match args.ci.as_deref() {
        None => None,
        Some("none") => Some(None),
        Some(value) => Some(Some(CiProvider::parse(value)?)),
    };

    Ok(Answers {
        name: args.name.clone(),
        description: args.description.clone(),
        git_ssh_url: args.ssh_url.clone(),
        git_https_url: args.https_url.clone(),
        author_name: args.author.clone(),
        author_email: args.email.clone(),
        tags: args.tags.clone(),
        ci,
        with_tests: flag_pair(args.with_tests, args.skip_tests),
        with_venv: flag_pair(args.with_venv, args.skip_venv),
    })
}

fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    if yes {
        Some(true)
    } else if no {
        Some(false)
    } else {
        None
    }
}

fn build_next_steps(ctx: &ProjectContext) -> Vec<String> {
    let mut next_steps = Vec::new();

    if let Some(root) = &ctx.project_root {
        next_steps.push(format!("cd {}", root.display()));
    }

    match &ctx.venv_activation {
        Some(activation) => {
            next_steps.push(format!(
                "Activate the project virtualenv: {}",
                activation
            ));
        }
        None => {
            next_steps.push(
                "Create a virtualenv with `python3 -m venv .venv` and `pip install -e .`"
                    .to_string(),
            );
        }
    }

    next_steps.push(format!(
        "Run `{} --help` inside the virtualenv to try the generated CLI",
        ctx.project_name
    ));

    next_steps
}
