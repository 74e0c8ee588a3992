//! Embedded template texts and generated file names.
//!
//! File names are part of the tool's observable contract.

pub const SETUP_PY_FILE: &str = "setup.py";
pub const REQUIREMENTS_FILE: &str = "requirements.txt";
pub const TRAVIS_FILE: &str = ".travis.yml";
pub const GITHUB_WORKFLOW_DIR: &str = ".github/workflows";
pub const GITHUB_WORKFLOW_FILE: &str = "ci.yml";
pub const INIT_FILE: &str = "__init__.py";
pub const CLI_FILE: &str = "cli.py";
pub const TESTS_DIR: &str = "tests";
pub const TEST_FILE: &str = "test_cli.py";

/// Rendered strictly: every placeholder must resolve.
pub const SETUP_PY: &str = r#"from setuptools import setup, find_packages


def readme():
    with open('README.md') as f:
        return f.read()


setup(
    name='{{projectName}}',
    version='0.1.0',

    description='{{projectDescription}}',
    long_description=readme(),
    long_description_content_type='text/markdown',

    url='{{projectGithubUrl}}',
    license='MIT',

    author='{{authorName}}',
    author_email='{{authorEmail}}',

    keywords='{{projectTags}}',

    packages=find_packages(),
    install_requires=[
        'click~=8.1',
    ],

    project_urls={
        'Source': '{{projectGithubUrl}}',
    },

    entry_points={
        'console_scripts': [
            '{{projectName}}={{projectName}}.cli:cli'
        ],
    },
)
"#;

pub const REQUIREMENTS_TXT: &str = "click~=8.1\n";

/// Written verbatim; the template carries no placeholders.
pub const TRAVIS_YML: &str = r#"language: python
python:
  - "3.11"
  - "3.12"
install:
  - pip install -e .
  - pip install pytest
script:
  - pytest
"#;

/// Rendered leniently: GitHub's own `${{ ... }}` expressions must
/// survive verbatim, so unresolved placeholders are not an error here.
pub const GITHUB_ACTIONS_YML: &str = r#"name: CI

on:
  push:
    branches: [main]
  pull_request:

jobs:
  test:
    runs-on: ubuntu-latest
    strategy:
      matrix:
        python-version: ["3.11", "3.12"]
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-python@v5
        with:
          python-version: ${{ matrix.python-version }}
      - run: pip install -e .
      - run: pip install pytest
      - run: python -c "import {{projectName}}"
      - run: pytest
"#;

/// Rendered strictly.
pub const CLI_PY: &str = r#"import click


@click.group(help="{{projectDescription}}")
def cli():
    """CLI starting point."""


@cli.command()
def info():
    """Print basic project information."""
    click.echo("{{projectName}}")
"#;

/// Rendered strictly.
pub const TEST_CLI_PY: &str = r#"from click.testing import CliRunner

from {{projectName}}.cli import cli


def test_cli_help():
    runner = CliRunner()
    result = runner.invoke(cli, ['--help'])
    assert result.exit_code == 0


def test_info_prints_project_name():
    runner = CliRunner()
    result = runner.invoke(cli, ['info'])
    assert result.exit_code == 0
    assert '{{projectName}}' in result.output
"#;
