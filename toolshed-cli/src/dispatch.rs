/// Command dispatcher: parses typed commands and calls the core
///
/// The dispatcher is deliberately thin. It gathers raw string input,
/// calls exactly one core operation per command, and prints the
/// Success / Rejected / Error outcome. It holds no state of its own —
/// "who is logged in" is the [`AuthenticatedSession`] value handed to it,
/// and every read goes back to the store.
use std::io;

use sqlx::PgPool;
use toolshed_core::models::category::{Category, CategorySummary};
use toolshed_core::models::tool::{SortDirection, SortKey, Tool};
use toolshed_core::search;
use toolshed_core::session::AuthenticatedSession;
use toolshed_core::RegistryError;

use crate::prompt;

/// A parsed top-level command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Tool(ToolAction),
    Categ(CategAction),
}

/// Subcommands of `tool`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    View,
    Add,
    Edit,
    Delete,
    Search,
}

/// Subcommands of `categ`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategAction {
    View,
    Add,
    Edit,
    Delete,
}

/// Why a typed line did not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The command word is not in the command table
    UnknownCommand,

    /// The command exists but its flag is missing, extra, or unrecognized
    InvalidUsage,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownCommand => write!(f, "Unknown command - see \"help\""),
            ParseError::InvalidUsage => write!(f, "Invalid usage - see \"help\""),
        }
    }
}

/// Parses one typed line into a [`Command`]
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(ParseError::UnknownCommand)?;
    let flag = words.next();

    if words.next().is_some() {
        return Err(ParseError::InvalidUsage);
    }

    match (command, flag) {
        ("help", None) => Ok(Command::Help),
        ("quit", None) => Ok(Command::Quit),
        ("help" | "quit", Some(_)) => Err(ParseError::InvalidUsage),
        ("tool", Some(flag)) => match flag {
            "v" => Ok(Command::Tool(ToolAction::View)),
            "a" => Ok(Command::Tool(ToolAction::Add)),
            "e" => Ok(Command::Tool(ToolAction::Edit)),
            "d" => Ok(Command::Tool(ToolAction::Delete)),
            "s" => Ok(Command::Tool(ToolAction::Search)),
            _ => Err(ParseError::InvalidUsage),
        },
        ("categ", Some(flag)) => match flag {
            "v" => Ok(Command::Categ(CategAction::View)),
            "a" => Ok(Command::Categ(CategAction::Add)),
            "e" => Ok(Command::Categ(CategAction::Edit)),
            "d" => Ok(Command::Categ(CategAction::Delete)),
            _ => Err(ParseError::InvalidUsage),
        },
        ("tool" | "categ", None) => Err(ParseError::InvalidUsage),
        _ => Err(ParseError::UnknownCommand),
    }
}

/// Prints the help menu
pub fn print_help() {
    println!("Commands:");
    println!("help             -  displays this menu");
    println!("quit             -  exits the program");
    println!("tool [v a e d s] -  manage your tools [view add edit delete search]");
    println!("categ [v a e d]  -  manage your categories [view add edit delete]");
}

fn print_tool(tool: &Tool) {
    let shared = if tool.shareable { "shareable" } else { "private" };
    println!(
        "  {}  {}  owner: {}  ({})",
        tool.barcode, tool.name, tool.owner, shared
    );
}

fn print_category(summary: &CategorySummary) {
    if summary.barcodes.is_empty() {
        println!("  {}  (empty)", summary.name);
    } else {
        println!(
            "  {}  ({}): {}",
            summary.name,
            summary.barcodes.len(),
            summary.barcodes.join(", ")
        );
    }
}

fn report_fault(context: &str, err: RegistryError) {
    tracing::warn!(error = %err, "{context}");
    println!("{context}");
}

/// Runs one `tool` subcommand against the core
pub async fn run_tool_action(
    pool: &PgPool,
    session: &AuthenticatedSession,
    action: ToolAction,
) -> io::Result<()> {
    match action {
        ToolAction::View => {
            let key = match prompt::choice("Sort by category or name? (c/n): ")?.as_str() {
                "c" => SortKey::Category,
                "n" => SortKey::Name,
                _ => {
                    println!("Invalid input");
                    return Ok(());
                }
            };
            let direction = match prompt::choice("Ascending or descending? (a/d): ")?.as_str() {
                "a" => SortDirection::Ascending,
                "d" => SortDirection::Descending,
                _ => {
                    println!("Invalid input");
                    return Ok(());
                }
            };

            match Tool::list_visible(pool, session, key, direction).await {
                Ok(tools) if tools.is_empty() => println!("No tools to show"),
                Ok(tools) => {
                    for tool in &tools {
                        print_tool(tool);
                    }
                }
                Err(e) => report_fault("Error showing tools", e),
            }
        }
        ToolAction::Add => {
            let barcode = prompt::line("Barcode: ")?;
            match Tool::claim(pool, session, &barcode).await {
                Ok(true) => println!("Tool added"),
                Ok(false) => println!("Tool is already owned, or does not exist"),
                Err(e) => report_fault("Error adding tool", e),
            }
        }
        ToolAction::Edit => {
            let barcode = prompt::line("Barcode: ")?;
            let Some(shareable) = prompt::yes_no("Make shareable? (y/n): ")? else {
                println!("Invalid input");
                return Ok(());
            };
            match Tool::set_shareable(pool, session, &barcode, shareable).await {
                Ok(true) => println!("Tool edited"),
                Ok(false) => println!("Tool is not owned by you, or does not exist"),
                Err(e) => report_fault("Error editing tool", e),
            }
        }
        ToolAction::Delete => {
            let barcode = prompt::line("Barcode: ")?;
            match Tool::remove(pool, session, &barcode).await {
                Ok(true) => println!("Tool deleted"),
                Ok(false) => println!("Tool is not owned by you, or does not exist"),
                Err(e) => report_fault("Error deleting tool", e),
            }
        }
        ToolAction::Search => {
            let barcode = prompt::line("Tool barcode (enter to omit): ")?;
            if !barcode.is_empty() {
                match search::by_barcode(pool, session, &barcode).await {
                    Ok(Some(tool)) => {
                        println!("Found a tool with that barcode:");
                        print_tool(&tool);
                    }
                    Ok(None) => println!("No tool has that barcode"),
                    Err(e) => report_fault("Error searching for tools", e),
                }
            } else {
                let name = prompt::choice("Tool name (enter to omit): ")?;
                let categ = prompt::choice("Tool category (enter to omit): ")?;
                match search::by_name_and_category(pool, session, &name, &categ).await {
                    Ok(tools) if tools.is_empty() => println!("No tools found matching criteria"),
                    Ok(tools) => {
                        println!("Found {} tool(s) matching criteria:", tools.len());
                        for tool in &tools {
                            print_tool(tool);
                        }
                    }
                    Err(e) => report_fault("Error searching for tools", e),
                }
            }
        }
    }

    Ok(())
}

/// Runs one `categ` subcommand against the core
pub async fn run_categ_action(
    pool: &PgPool,
    session: &AuthenticatedSession,
    action: CategAction,
) -> io::Result<()> {
    match action {
        CategAction::View => match Category::list(pool, session).await {
            Ok(summaries) if summaries.is_empty() => println!("No categories to show"),
            Ok(summaries) => {
                for summary in &summaries {
                    print_category(summary);
                }
            }
            Err(e) => report_fault("Error showing categories", e),
        },
        CategAction::Add => {
            let name = prompt::line("Name of new category: ")?;
            match Category::create(pool, session, &name).await {
                Ok(true) => println!("Created successfully"),
                Ok(false) => println!("Category already exists"),
                Err(e) => report_fault("Error creating category", e),
            }
        }
        CategAction::Edit => {
            let name = prompt::line("Name of category to edit: ")?;
            match prompt::choice("Edit name or tools (n/t): ")?.as_str() {
                "n" => {
                    let new_name = prompt::line("New name: ")?;
                    match Category::rename(pool, session, &name, &new_name).await {
                        Ok(true) => println!("Edited name successfully"),
                        Ok(false) => println!("Category does not exist or name is already in use"),
                        Err(e) => report_fault("Error editing category name", e),
                    }
                }
                "t" => match prompt::choice("Add or remove tool (a/r): ")?.as_str() {
                    "a" => {
                        let barcode = prompt::line("Tool barcode (must own): ")?;
                        match Category::add_tool(pool, session, &name, &barcode).await {
                            Ok(true) => println!("Added tool to category successfully"),
                            Ok(false) => println!(
                                "Category or tool does not exist or tool is not owned or tool already is in category"
                            ),
                            Err(e) => report_fault("Error adding tool to category", e),
                        }
                    }
                    "r" => {
                        let barcode = prompt::line("Tool barcode: ")?;
                        match Category::remove_tool(pool, session, &name, &barcode).await {
                            Ok(true) => println!("Removed tool from category successfully"),
                            Ok(false) => println!("Category or tool does not exist"),
                            Err(e) => report_fault("Error removing tool from category", e),
                        }
                    }
                    _ => println!("Invalid input"),
                },
                _ => println!("Invalid input"),
            }
        }
        CategAction::Delete => {
            let name = prompt::line("Name of category to delete: ")?;
            match Category::delete(pool, session, &name).await {
                Ok(true) => println!("Deleted successfully"),
                Ok(false) => println!("Category does not exist"),
                Err(e) => report_fault("Error deleting category", e),
            }
        }
    }

    Ok(())
}
