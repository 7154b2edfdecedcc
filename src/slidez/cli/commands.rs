//! # CLI Layer
//!
//! One possible front end for slidez, and the only place that knows about
//! terminal I/O, logging setup and exit codes.
//!
//! - `run()`: parses arguments, installs logging, dispatches (called by `main.rs`)
//! - `handle_*()`: per-area handlers that build an options struct, call the
//!   API and print the `CmdResult`
//!
//! Flags never outlive the handler that reads them: each handler turns its
//! arguments into one options struct and hands it to the API by value.

use super::render::print_result;
use super::setup::{
    print_grouped_help, Cli, Commands, ContentCommands, MiscCommands, PresentationCommands,
    SlideCommands, TextCommands,
};
use clap::Parser;
use slidez::api::{
    AddNotes, AddShape, AddSlide, ConfigAction, CopyTextStyle, CreatePresentation, CreateTable,
    Export, MoveSlide, ReplaceText, StyleCell, UpdateCell,
};
use slidez::auth::CodePrompt;
use slidez::error::{Result, SlidezError};
use slidez::init::{initialize, SlidezContext};
use slidez::service::ExportFormat;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SLIDEZ_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        print_grouped_help();
        return Ok(());
    };

    let mut ctx = initialize(terminal_prompt())?;

    match command {
        Commands::Presentation(cmd) => handle_presentation(&mut ctx, cmd),
        Commands::Slides(cmd) => handle_slides(&mut ctx, cmd),
        Commands::Content(cmd) => handle_content(&mut ctx, cmd),
        Commands::Text(cmd) => handle_text(&mut ctx, cmd),
        Commands::Misc(MiscCommands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "slidez=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Asks for the authorization code on the terminal.
fn terminal_prompt() -> CodePrompt {
    Box::new(|url: &str| -> Result<String> {
        eprintln!("Go to the following link in your browser:\n{}\n", url);
        eprint!("Enter authorization code: ");
        std::io::stderr().flush()?;
        let mut code = String::new();
        std::io::stdin().lock().read_line(&mut code)?;
        Ok(code.trim().to_string())
    })
}

fn handle_presentation(ctx: &mut SlidezContext, cmd: PresentationCommands) -> Result<()> {
    let result = match cmd {
        PresentationCommands::CreatePresentation { title, folder } => ctx
            .api
            .create_presentation(CreatePresentation { title, folder })?,
        PresentationCommands::ExportPdf {
            presentation_id,
            output_file,
        } => ctx.api.export(
            &presentation_id,
            Export {
                format: ExportFormat::Pdf,
                output: output_file,
            },
        )?,
        PresentationCommands::ExportPptx {
            presentation_id,
            output_file,
        } => ctx.api.export(
            &presentation_id,
            Export {
                format: ExportFormat::Pptx,
                output: output_file,
            },
        )?,
    };
    print_result(&result)
}

fn handle_slides(ctx: &mut SlidezContext, cmd: SlideCommands) -> Result<()> {
    let result = match cmd {
        SlideCommands::AddSlide {
            presentation_id,
            layout,
            position,
        } => {
            let opts = AddSlide {
                layout: layout
                    .map(|l| l.to_ascii_uppercase())
                    .unwrap_or_else(|| ctx.config.default_layout.clone()),
                position: position.and_then(|p| usize::try_from(p).ok()),
            };
            ctx.api.add_slide(&presentation_id, opts)?
        }
        SlideCommands::DuplicateSlide {
            presentation_id,
            slide_index,
        } => ctx.api.duplicate_slide(&presentation_id, slide_index)?,
        SlideCommands::RemoveSlide {
            presentation_id,
            slide_index,
        } => ctx.api.remove_slide(&presentation_id, slide_index)?,
        SlideCommands::MoveSlide {
            presentation_id,
            slide_index,
            new_position,
        } => ctx.api.move_slide(
            &presentation_id,
            MoveSlide {
                slide_index,
                position: new_position,
            },
        )?,
        SlideCommands::ReorderSlides {
            presentation_id,
            indices,
        } => ctx.api.reorder_slides(&presentation_id, &indices)?,
    };
    print_result(&result)
}

fn handle_content(ctx: &mut SlidezContext, cmd: ContentCommands) -> Result<()> {
    let result = match cmd {
        ContentCommands::CreateTable {
            presentation_id,
            slide_index,
            rows,
            cols,
        } => ctx.api.create_table(
            &presentation_id,
            CreateTable {
                slide_index,
                rows,
                columns: cols,
            },
        )?,
        ContentCommands::UpdateCell {
            presentation_id,
            table_id,
            row,
            col,
            text,
        } => ctx.api.update_cell(
            &presentation_id,
            UpdateCell {
                table_id,
                row,
                column: col,
                text,
            },
        )?,
        ContentCommands::StyleCell {
            presentation_id,
            table_id,
            row,
            col,
            bg_color,
        } => {
            let background = bg_color.ok_or_else(|| {
                SlidezError::MalformedInput("background color is required (--bg-color)".to_string())
            })?;
            ctx.api.style_cell(
                &presentation_id,
                StyleCell {
                    table_id,
                    row,
                    column: col,
                    background,
                },
            )?
        }
        ContentCommands::AddShape {
            presentation_id,
            slide_index,
            shape_type,
        } => ctx.api.add_shape(
            &presentation_id,
            AddShape {
                slide_index,
                shape_type,
            },
        )?,
        ContentCommands::CopyTextStyle {
            presentation_id,
            source_object_id,
            target_object_id,
        } => ctx.api.copy_text_style(
            &presentation_id,
            CopyTextStyle {
                source_id: source_object_id,
                target_id: target_object_id,
            },
        )?,
    };
    print_result(&result)
}

fn handle_text(ctx: &mut SlidezContext, cmd: TextCommands) -> Result<()> {
    let result = match cmd {
        TextCommands::ReplaceText {
            presentation_id,
            find,
            replace,
        } => ctx
            .api
            .replace_text(&presentation_id, ReplaceText { find, replace })?,
        TextCommands::ExtractAllText { presentation_id } => {
            ctx.api.extract_all_text(&presentation_id)?
        }
        TextCommands::SearchText {
            presentation_id,
            query,
        } => ctx.api.search_text(&presentation_id, &query)?,
        TextCommands::GetNotes {
            presentation_id,
            slide_index,
        } => ctx.api.get_notes(&presentation_id, slide_index)?,
        TextCommands::AddNotes {
            presentation_id,
            slide_index,
            notes,
        } => ctx.api.add_notes(
            &presentation_id,
            AddNotes {
                slide_index,
                text: notes,
            },
        )?,
        TextCommands::ExtractAllNotes { presentation_id } => {
            ctx.api.extract_all_notes(&presentation_id)?
        }
    };
    print_result(&result)
}

fn handle_config(ctx: &SlidezContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    print_result(&result)
}
