/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#![warn(rust_2018_idioms)]

use anyhow::Result;
use async_trait::async_trait;
use futures::executor::block_on;
use remote_tabs_panel::{
    clients_and_tabs_from_json, AccountProvider, ClientAndTabs, Clock, LogFacadeLogger,
    PanelCollaborators, PanelNavigator, PanelState, PanelView, RefreshIndicator,
    RemoteTabsPanel, SyncBackend, SystemClock, Timestamp, ViewEffect, VisitType,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;

#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "remote-tabs-panel", about = "Drive the remote tabs panel from a fixture")]
pub struct Opts {
    #[structopt(
        name = "fixture",
        value_name = "FIXTURE_JSON",
        long,
        short = "f",
        default_value = "./remote-tabs.json",
        parse(from_os_str)
    )]
    /// JSON array of `{client, tabs}` records, read again on every refresh.
    pub fixture: PathBuf,

    #[structopt(long)]
    /// Behave as if no account is signed in.
    pub no_account: bool,

    #[structopt(long)]
    /// Make every fetch fail.
    pub fail: bool,

    #[structopt(long, value_name = "MS")]
    /// Use this many ms since the epoch as "now" instead of the system clock.
    pub now: Option<u64>,
}

struct FixtureBackend {
    path: PathBuf,
    fail: bool,
}

#[async_trait]
impl SyncBackend for FixtureBackend {
    async fn fetch_clients_and_tabs(&self) -> remote_tabs_panel::Result<Vec<ClientAndTabs>> {
        if self.fail {
            return Err(remote_tabs_panel::Error::backend("failure requested"));
        }
        let json = std::fs::read_to_string(&self.path)?;
        clients_and_tabs_from_json(&json)
    }
}

struct StaticAccount(bool);

impl AccountProvider for StaticAccount {
    fn has_account(&self) -> bool {
        self.0
    }
}

struct FixedClock(Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Logs what a real view would do; the panel contents are printed from `main`.
struct TerminalView;

impl PanelView for TerminalView {
    fn apply_effects(&self, effects: &[ViewEffect]) {
        for effect in effects {
            log::info!("view: {:?}", effect);
        }
    }

    fn state_changed(&self, state: &PanelState) {
        match state {
            PanelState::NoAccount => println!("Welcome to Sync"),
            PanelState::Empty => println!("No tabs from other devices."),
            PanelState::Populated(sections) => {
                log::info!("view: showing {} devices", sections.len())
            }
        }
    }
}

impl RefreshIndicator for TerminalView {
    fn begin_refreshing(&self) {
        println!("Refreshing...");
    }

    fn end_refreshing(&self) {
        log::info!("view: refresh finished");
    }
}

impl PanelNavigator for TerminalView {
    fn did_select_url(&self, url: &url::Url, visit_type: VisitType) {
        println!("Opening {} ({:?})", url, visit_type);
    }

    fn did_request_sign_in(&self) {
        println!("Sign in to sync your tabs, bookmarks, passwords, & more.");
    }

    fn did_request_create_account(&self) {
        println!("Create an account to start syncing.");
    }
}

fn print_panel(panel: &RemoteTabsPanel) {
    for section in 0..panel.number_of_sections() {
        if let Some(header) = panel.section_header(section) {
            println!(
                "[{}] {} ({}) - {}",
                section, header.title, header.accessibility_label, header.detail
            );
        }
        for row in 0..panel.number_of_rows(section) {
            if let Some(tab) = panel.tab_row(section, row) {
                println!("    [{}] {}", row, tab.title);
                println!("        {}", tab.subtitle);
            }
        }
    }
}

fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}: ", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_row(input: &str) -> Option<(usize, usize)> {
    let (section, row) = input.split_once(':')?;
    Some((section.trim().parse().ok()?, row.trim().parse().ok()?))
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let opts = Opts::from_args();

    let view = Arc::new(TerminalView);
    let clock: Arc<dyn Clock> = match opts.now {
        Some(ms) => Arc::new(FixedClock(Timestamp(ms))),
        None => Arc::new(SystemClock),
    };
    let panel = RemoteTabsPanel::new(PanelCollaborators {
        backend: Arc::new(FixtureBackend {
            path: opts.fixture.clone(),
            fail: opts.fail,
        }),
        account: Arc::new(StaticAccount(!opts.no_account)),
        indicator: view.clone(),
        logger: Arc::new(LogFacadeLogger),
        view: view.clone(),
        navigator: view,
        clock,
    });

    block_on(panel.activate());
    print_panel(&panel);

    loop {
        let input = match prompt(
            "[R]efresh, [O]pen a tab, [S]ign in, [C]reate an account, [P]rint or [Q]uit",
        )? {
            Some(input) => input,
            None => break,
        };
        match input.chars().next().unwrap_or('?') {
            'R' | 'r' => {
                let outcome = block_on(panel.refresh());
                log::info!("refresh: {:?}", outcome);
                print_panel(&panel);
            }
            'O' | 'o' => {
                let which = prompt("section:row")?.unwrap_or_default();
                match parse_row(&which) {
                    Some((section, row)) => {
                        if !panel.select_row(section, row) {
                            println!("No tab at {}", which);
                        }
                    }
                    None => println!("Expected something like 0:1"),
                }
            }
            'S' | 's' => panel.sign_in(),
            'C' | 'c' => panel.create_account(),
            'P' | 'p' => print_panel(&panel),
            'Q' | 'q' => break,
            _ => continue,
        }
    }
    Ok(())
}
