use std::error::Error;
use std::path::PathBuf;

use dash_core::draft::CategoryDraft;
use dash_core::draft::WidgetDraft;
use dash_core::ids::IdGenerator;
use dash_core::migration::migrate_blob;
use dash_core::persistence::SlotStorage;
use dash_core::persistence::WriteStatus;
use dash_core::state::DashboardState;
use dash_core::store::DashboardStore;
use dash_core::store::DispatchReport;

use super::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Catalog,
    Search(String),
    AddCategory {
        name: String,
    },
    RemoveCategory {
        id: String,
    },
    AddWidget {
        category_id: String,
        name: String,
        text: String,
    },
    RemoveWidget {
        id: String,
    },
    SetVisible {
        category_id: String,
        widget_id: String,
        visible: bool,
    },
    Pick {
        category_id: String,
        widget_id: String,
        checked: bool,
    },
    Import(PathBuf),
    Export,
    Reset,
}

pub fn parse_command(args: &[String]) -> Result<Command, Box<dyn Error>> {
    let Some((name, rest)) = args.split_first() else {
        return Err("missing command".into());
    };
    let command = match name.as_str() {
        "show" => {
            expect_arity(name, rest, 0)?;
            Command::Show
        }
        "catalog" => {
            expect_arity(name, rest, 0)?;
            Command::Catalog
        }
        "search" => Command::Search(rest.join(" ")),
        "add-category" => {
            if rest.is_empty() {
                return Err("add-category requires a NAME".into());
            }
            Command::AddCategory {
                name: rest.join(" "),
            }
        }
        "remove-category" => {
            expect_arity(name, rest, 1)?;
            Command::RemoveCategory {
                id: rest[0].clone(),
            }
        }
        "add-widget" => parse_add_widget(rest)?,
        "remove-widget" => {
            expect_arity(name, rest, 1)?;
            Command::RemoveWidget {
                id: rest[0].clone(),
            }
        }
        "show-widget" | "hide-widget" => {
            expect_arity(name, rest, 2)?;
            Command::SetVisible {
                category_id: rest[0].clone(),
                widget_id: rest[1].clone(),
                visible: name == "show-widget",
            }
        }
        "pick" => {
            expect_arity(name, rest, 3)?;
            let checked = match rest[2].as_str() {
                "on" => true,
                "off" => false,
                other => return Err(format!("pick expects on|off, got `{other}`").into()),
            };
            Command::Pick {
                category_id: rest[0].clone(),
                widget_id: rest[1].clone(),
                checked,
            }
        }
        "import" => {
            expect_arity(name, rest, 1)?;
            Command::Import(PathBuf::from(&rest[0]))
        }
        "export" => {
            expect_arity(name, rest, 0)?;
            Command::Export
        }
        "reset" => {
            expect_arity(name, rest, 0)?;
            Command::Reset
        }
        other => return Err(format!("unknown command: {other}").into()),
    };
    Ok(command)
}

fn parse_add_widget(args: &[String]) -> Result<Command, Box<dyn Error>> {
    let mut category_id = None;
    let mut name = None;
    let mut text = String::new();
    let mut i = 0;
    while i < args.len() {
        let Some(value) = args.get(i + 1) else {
            return Err(format!("{} requires a value", args[i]).into());
        };
        match args[i].as_str() {
            "--category" => category_id = Some(value.clone()),
            "--name" => name = Some(value.clone()),
            "--text" => text = value.clone(),
            other => return Err(format!("unsupported argument: {other}").into()),
        }
        i += 2;
    }
    let Some(category_id) = category_id else {
        return Err("add-widget requires --category ID".into());
    };
    let Some(name) = name else {
        return Err("add-widget requires --name NAME".into());
    };
    Ok(Command::AddWidget {
        category_id,
        name,
        text,
    })
}

fn expect_arity(name: &str, rest: &[String], count: usize) -> Result<(), Box<dyn Error>> {
    if rest.len() != count {
        return Err(format!("{name} expects {count} argument(s), got {}", rest.len()).into());
    }
    Ok(())
}

/// Runs one command against the store and returns the text to print.
pub fn execute<S: SlotStorage>(
    store: &mut DashboardStore<S>,
    ids: &mut IdGenerator,
    command: Command,
) -> Result<String, Box<dyn Error>> {
    match command {
        Command::Show => Ok(render::dashboard(&store.category_views())),
        Command::Catalog => Ok(render::catalog(store.state(), &store.catalog_by_category())),
        Command::Search(query) => Ok(render::search_results(&store.search(&query))),
        Command::AddCategory { name } => {
            let (id, name) = CategoryDraft::new(&name)?.into_parts(ids);
            let report = store.add_category(id.clone(), name)?;
            Ok(outcome(&report, &format!("added category {id}")))
        }
        Command::RemoveCategory { id } => {
            let report = store.remove_category(&id);
            Ok(outcome(&report, &format!("removed category {id}")))
        }
        Command::AddWidget {
            category_id,
            name,
            text,
        } => {
            if store.state().find_category(&category_id).is_none() {
                return Err(format!("unknown category: {category_id}").into());
            }
            let widget = WidgetDraft::new(&name, &text)?.into_widget(&category_id, ids);
            let id = widget.id.clone();
            let report = store.add_and_show_widget(&category_id, widget);
            Ok(outcome(&report, &format!("added widget {id} to {category_id}")))
        }
        Command::RemoveWidget { id } => {
            let report = store.remove_widget(&id);
            Ok(outcome(&report, &format!("removed widget {id}")))
        }
        Command::SetVisible {
            category_id,
            widget_id,
            visible,
        } => {
            let report = store.toggle_widget_visibility(&category_id, &widget_id, visible);
            let verb = if visible { "showing" } else { "hiding" };
            Ok(outcome(
                &report,
                &format!("{verb} {widget_id} in {category_id}"),
            ))
        }
        Command::Pick {
            category_id,
            widget_id,
            checked,
        } => {
            let Some(widget) = store.state().find_widget(&widget_id).cloned() else {
                return Err(format!("unknown widget: {widget_id}").into());
            };
            let report = store.toggle_widget_in_category(&category_id, widget, checked);
            let state = if checked { "on" } else { "off" };
            Ok(outcome(
                &report,
                &format!("{widget_id} {state} in {category_id}"),
            ))
        }
        Command::Import(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let Some(next) = migrate_blob(&raw) else {
                return Err(format!("{} is not a dashboard file", path.display()).into());
            };
            let report = store.set_all(next)?;
            Ok(outcome(&report, &format!("imported {}", path.display())))
        }
        Command::Export => {
            let mut encoded = serde_json::to_string_pretty(store.state())?;
            encoded.push('\n');
            Ok(encoded)
        }
        Command::Reset => {
            let report = store.set_all(DashboardState::sample())?;
            Ok(outcome(&report, "restored sample dashboard"))
        }
    }
}

fn outcome(report: &DispatchReport, done: &str) -> String {
    if !report.changed {
        return "nothing changed\n".to_string();
    }
    match &report.write {
        Some(WriteStatus::Failed(reason)) => {
            format!("{done}\nwarning: changes not saved: {reason}\n")
        }
        _ => format!("{done}\n"),
    }
}
