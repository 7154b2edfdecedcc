use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("SLIDEZ_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("SLIDEZ_GIT_DATE");
    const IS_RELEASE: &str = env!("SLIDEZ_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

const ABOUT: &str = "Edit, query and export slide presentations from the command line";

#[derive(Parser, Debug)]
#[command(
    name = "slidez",
    bin_name = "slidez",
    version = get_version(),
    about = ABOUT,
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Debug logging on stderr (SLIDEZ_LOG overrides)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Presentation,
    Slides,
    Content,
    Text,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Presentation => "Presentation Commands:",
            CommandGroup::Slides => "Slide Commands:",
            CommandGroup::Content => "Table & Shape Commands:",
            CommandGroup::Text => "Text & Notes Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "create-presentation" | "export-pdf" | "export-pptx" => {
                Some(CommandGroup::Presentation)
            }
            "add-slide" | "duplicate-slide" | "remove-slide" | "move-slide" | "reorder-slides" => {
                Some(CommandGroup::Slides)
            }
            "create-table" | "update-cell" | "style-cell" | "add-shape" | "copy-text-style" => {
                Some(CommandGroup::Content)
            }
            "replace-text" | "extract-all-text" | "search-text" | "get-notes" | "add-notes"
            | "extract-all-notes" => Some(CommandGroup::Text),
            "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Presentation,
            CommandGroup::Slides,
            CommandGroup::Content,
            CommandGroup::Text,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the grouped overview printed when no command is given
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("slidez {version}\n"));
    output.push_str(ABOUT);
    output.push_str("\n\nUsage: slidez [OPTIONS] <COMMAND>\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<20} {}\n", sc.get_name(), about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose    Debug logging on stderr\n");
    output.push_str("  -h, --help       Print help (see `slidez <COMMAND> --help`)\n");
    output.push_str("  -V, --version    Print version\n");
    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Presentation(PresentationCommands),

    #[command(flatten)]
    Slides(SlideCommands),

    #[command(flatten)]
    Content(ContentCommands),

    #[command(flatten)]
    Text(TextCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum PresentationCommands {
    /// Create a new presentation and print its id
    #[command(display_order = 1)]
    CreatePresentation {
        title: String,

        /// Folder id to place the presentation in
        #[arg(long)]
        folder: Option<String>,
    },

    /// Export a presentation as PDF
    #[command(display_order = 2)]
    ExportPdf {
        presentation_id: String,
        output_file: PathBuf,
    },

    /// Export a presentation as PPTX
    #[command(display_order = 3)]
    ExportPptx {
        presentation_id: String,
        output_file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum SlideCommands {
    /// Add a slide and print its id
    #[command(display_order = 10)]
    AddSlide {
        presentation_id: String,

        /// Predefined layout (BLANK, TITLE, TITLE_AND_BODY, ...); defaults to the configured one
        #[arg(long)]
        layout: Option<String>,

        /// Insertion index; negative appends
        #[arg(long, allow_negative_numbers = true)]
        position: Option<i64>,
    },

    /// Duplicate a slide
    #[command(display_order = 11)]
    DuplicateSlide {
        presentation_id: String,
        #[arg(allow_negative_numbers = true)]
        slide_index: i64,
    },

    /// Remove a slide
    #[command(display_order = 12)]
    RemoveSlide {
        presentation_id: String,
        #[arg(allow_negative_numbers = true)]
        slide_index: i64,
    },

    /// Move a slide to a new position
    #[command(display_order = 13)]
    MoveSlide {
        presentation_id: String,
        #[arg(allow_negative_numbers = true)]
        slide_index: i64,
        #[arg(allow_negative_numbers = true)]
        new_position: i64,
    },

    /// Reorder slides, e.g. "2,0,1" puts slide 2 first
    #[command(display_order = 14)]
    ReorderSlides {
        presentation_id: String,
        /// Comma separated slide indexes in their new order
        #[arg(allow_hyphen_values = true)]
        indices: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// Create a table on a slide and print its id
    #[command(display_order = 20)]
    CreateTable {
        presentation_id: String,
        #[arg(allow_negative_numbers = true)]
        slide_index: i64,
        rows: u32,
        cols: u32,
    },

    /// Write text into a table cell
    #[command(display_order = 21)]
    UpdateCell {
        presentation_id: String,
        table_id: String,
        row: u32,
        col: u32,
        text: String,
    },

    /// Set the background color of a table cell
    #[command(display_order = 22)]
    StyleCell {
        presentation_id: String,
        table_id: String,
        row: u32,
        col: u32,

        /// Background color as #RRGGBB
        #[arg(long)]
        bg_color: Option<String>,
    },

    /// Add a shape to a slide and print its id
    #[command(display_order = 23)]
    AddShape {
        presentation_id: String,
        #[arg(allow_negative_numbers = true)]
        slide_index: i64,
        /// RECTANGLE, ELLIPSE, TEXT_BOX, ...
        shape_type: String,
    },

    /// Copy the text style of one element onto another
    #[command(display_order = 24)]
    CopyTextStyle {
        presentation_id: String,
        source_object_id: String,
        target_object_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TextCommands {
    /// Replace text everywhere in the presentation (case-insensitive)
    #[command(display_order = 30)]
    ReplaceText {
        presentation_id: String,
        find: String,
        replace: String,
    },

    /// Print all slide text
    #[command(display_order = 31)]
    ExtractAllText { presentation_id: String },

    /// Search text runs and print matches as JSON
    #[command(display_order = 32)]
    SearchText {
        presentation_id: String,
        query: String,
    },

    /// Print the speaker notes of a slide
    #[command(display_order = 33)]
    GetNotes {
        presentation_id: String,
        #[arg(allow_negative_numbers = true)]
        slide_index: i64,
    },

    /// Add speaker notes to a slide
    #[command(display_order = 34)]
    AddNotes {
        presentation_id: String,
        #[arg(allow_negative_numbers = true)]
        slide_index: i64,
        notes: String,
    },

    /// Print all speaker notes as JSON
    #[command(display_order = 35)]
    ExtractAllNotes { presentation_id: String },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 40)]
    Config {
        /// Configuration key (default-layout, credentials-dir, slides-endpoint, drive-endpoint)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
