use clap::{Args, Subcommand};

use issuetrack_core::{IssueRef, NewIssue, UpdateIssue};
use issuetrack_service::IssueService;
use issuetrack_store::{open_store, Backend};

use crate::config::DataDirArgs;
use crate::output::print_json;

#[derive(Args)]
pub struct IssueArgs {
    #[command(flatten)]
    data: DataDirArgs,
    /// Project the issues belong to
    #[arg(short, long)]
    project: String,
    #[command(subcommand)]
    command: IssueCommand,
}

#[derive(Subcommand)]
enum IssueCommand {
    /// Create a new issue
    New {
        #[arg(short, long)]
        title: String,
        #[arg(short = 'x', long)]
        text: String,
        /// Author of the issue
        #[arg(short, long)]
        by: String,
        #[arg(short, long)]
        assign: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List issues, optionally filtered by exact field values
    List {
        /// field=value; repeat to AND several filters
        #[arg(short, long = "filter", value_parser = parse_pair)]
        filters: Vec<(String, String)>,
    },
    /// Change fields of an issue
    Update {
        /// Issue ID (ULID)
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short = 'x', long)]
        text: Option<String>,
        #[arg(short, long)]
        by: Option<String>,
        #[arg(short, long)]
        assign: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
        /// Close the issue
        #[arg(long, conflicts_with = "reopen")]
        close: bool,
        /// Reopen a closed issue
        #[arg(long)]
        reopen: bool,
    },
    /// Delete an issue
    Delete {
        /// Issue ID (ULID)
        id: String,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("missing field name in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub async fn run(args: IssueArgs) -> anyhow::Result<()> {
    let layout = args.data.layout()?;
    let service = IssueService::new(open_store(&layout, Backend::Redb)?);
    let project = args.project.as_str();

    match args.command {
        IssueCommand::New {
            title,
            text,
            by,
            assign,
            status,
        } => {
            let fields = NewIssue {
                issue_title: Some(title),
                issue_text: Some(text),
                created_by: Some(by),
                assigned_to: assign,
                status_text: status,
            };
            let issue = service.create(project, fields).await?;
            print_json(&issue)?;
        }
        IssueCommand::List { filters } => {
            let issues = service.filter(project, filters).await?;
            if issues.is_empty() {
                eprintln!("No issues found.");
            }
            print_json(&issues)?;
        }
        IssueCommand::Update {
            id,
            title,
            text,
            by,
            assign,
            status,
            close,
            reopen,
        } => {
            let open = match (close, reopen) {
                (true, _) => Some(false),
                (_, true) => Some(true),
                _ => None,
            };
            let request = UpdateIssue {
                id: Some(id),
                issue_title: title,
                issue_text: text,
                created_by: by,
                assigned_to: assign,
                status_text: status,
                open,
            };
            let ack = service.update_by_id(project, request).await?;
            print_json(&ack)?;
        }
        IssueCommand::Delete { id } => {
            let ack = service
                .delete_by_id(project, IssueRef { id: Some(id) })
                .await?;
            print_json(&ack)?;
        }
    }
    Ok(())
}
