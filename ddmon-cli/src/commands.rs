//! Subcommands. Each one maps onto a single client operation.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use ddmon_client::Client;
use ddmon_types::{Monitor, MuteMonitorScope, UnmuteMonitorScopes};

use crate::duration::{end_after, parse_duration};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List monitors, optionally filtered by name, tags or group state
    List(ListArgs),

    /// Show one monitor
    Get { id: i64 },

    /// Create a monitor from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace a monitor with the contents of a JSON file
    Update {
        #[arg(short, long)]
        file: PathBuf,

        /// Monitor id (overrides the id in the file)
        #[arg(long)]
        id: Option<i64>,
    },

    /// Delete a monitor
    Delete { id: i64 },

    /// Mute every monitor
    MuteAll,

    /// Unmute every monitor
    UnmuteAll,

    /// Mute a monitor, or one of its scopes
    Mute {
        id: i64,

        /// Scope to mute (e.g. "host:web-1")
        #[arg(long)]
        scope: Option<String>,

        /// Unix time the mute ends
        #[arg(long, requires = "scope", conflicts_with = "duration")]
        end: Option<i64>,

        /// Mute length from now (e.g. "30m", "2h", "1d")
        #[arg(long, requires = "scope")]
        duration: Option<String>,
    },

    /// Unmute a monitor, or some of its scopes
    Unmute {
        id: i64,

        /// Scope to unmute
        #[arg(long, conflicts_with = "all_scopes")]
        scope: Option<String>,

        /// Unmute every scope
        #[arg(long)]
        all_scopes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Match monitors by name
    #[arg(long, conflicts_with_all = ["monitor_tags", "tags", "group_states", "with_downtimes"])]
    pub name: Option<String>,

    /// Monitor tags, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub monitor_tags: Vec<String>,

    /// Group (scope) tags, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Group states such as Alert, Warn, "No Data", comma-separated
    #[arg(long, value_delimiter = ',')]
    pub group_states: Vec<String>,

    /// Include downtimes in the result
    #[arg(long)]
    pub with_downtimes: bool,
}

/// Which list endpoint a set of filters resolves to.
#[derive(Debug, PartialEq, Eq)]
pub enum ListQuery<'a> {
    All,
    ByName(&'a str),
    ByMonitorTags(Vec<&'a str>),
    WithGroups {
        monitor_tags: Vec<&'a str>,
        tags: Vec<&'a str>,
        group_states: Vec<&'a str>,
        with_downtimes: bool,
    },
}

impl ListArgs {
    pub fn query(&self) -> ListQuery<'_> {
        let monitor_tags = as_strs(&self.monitor_tags);

        if let Some(name) = &self.name {
            return ListQuery::ByName(name);
        }

        if self.tags.is_empty() && self.group_states.is_empty() && !self.with_downtimes {
            return if monitor_tags.is_empty() {
                ListQuery::All
            } else {
                ListQuery::ByMonitorTags(monitor_tags)
            };
        }

        ListQuery::WithGroups {
            monitor_tags,
            tags: as_strs(&self.tags),
            group_states: as_strs(&self.group_states),
            with_downtimes: self.with_downtimes,
        }
    }
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

/// Run a command. Returns pretty-printed JSON for commands that fetch data.
pub async fn run(client: &Client, command: Command) -> Result<Option<String>> {
    match command {
        Command::List(args) => {
            let monitors = match args.query() {
                ListQuery::All => client.get_monitors().await?,
                ListQuery::ByName(name) => client.get_monitors_by_name(name).await?,
                ListQuery::ByMonitorTags(tags) => client.get_monitors_by_tags(&tags).await?,
                ListQuery::WithGroups {
                    monitor_tags,
                    tags,
                    group_states,
                    with_downtimes,
                } => {
                    client
                        .get_monitors_with_groups_by_tags(
                            &monitor_tags,
                            &tags,
                            &group_states,
                            with_downtimes,
                        )
                        .await?
                }
            };
            tracing::info!("Fetched {} monitors", monitors.len());
            Ok(Some(serde_json::to_string_pretty(&monitors)?))
        }
        Command::Get { id } => {
            let monitor = client.get_monitor(id).await?;
            Ok(Some(serde_json::to_string_pretty(&monitor)?))
        }
        Command::Create { file } => {
            let monitor = read_monitor(&file)?;
            let created = client.create_monitor(&monitor).await?;
            tracing::info!("Created monitor {:?}", created.id);
            Ok(Some(serde_json::to_string_pretty(&created)?))
        }
        Command::Update { file, id } => {
            let mut monitor = read_monitor(&file)?;
            if id.is_some() {
                monitor.id = id;
            }
            if monitor.id.is_none() {
                bail!("{} has no monitor id; pass --id", file.display());
            }
            client.update_monitor(&monitor).await?;
            Ok(None)
        }
        Command::Delete { id } => {
            client.delete_monitor(id).await?;
            Ok(None)
        }
        Command::MuteAll => {
            client.mute_monitors().await?;
            Ok(None)
        }
        Command::UnmuteAll => {
            client.unmute_monitors().await?;
            Ok(None)
        }
        Command::Mute {
            id,
            scope,
            end,
            duration,
        } => {
            match scope {
                Some(scope) => {
                    let end = match duration {
                        Some(d) => Some(end_after(parse_duration(&d)?)?),
                        None => end,
                    };
                    let body = MuteMonitorScope {
                        scope: Some(scope),
                        end,
                    };
                    client.mute_monitor_scope(id, &body).await?;
                }
                None => client.mute_monitor(id).await?,
            }
            Ok(None)
        }
        Command::Unmute {
            id,
            scope,
            all_scopes,
        } => {
            if all_scopes {
                client
                    .unmute_monitor_scopes(id, &UnmuteMonitorScopes::all())
                    .await?;
            } else if let Some(scope) = scope {
                client
                    .unmute_monitor_scopes(id, &UnmuteMonitorScopes::scope(scope))
                    .await?;
            } else {
                client.unmute_monitor(id).await?;
            }
            Ok(None)
        }
    }
}

fn read_monitor(path: &Path) -> Result<Monitor> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid monitor definition", path.display()))
}
