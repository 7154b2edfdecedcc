use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::service::{DocumentService, FileService};

#[derive(Debug, Clone)]
pub struct CreatePresentation {
    pub title: String,
    /// Folder to place the new presentation in.
    pub folder: Option<String>,
}

pub fn create<D: DocumentService, F: FileService>(
    docs: &mut D,
    files: &mut F,
    opts: CreatePresentation,
) -> Result<CmdResult> {
    let created = docs
        .create_document(&opts.title)
        .map_err(|e| e.during("creating presentation"))?;
    let id = created.presentation_id;

    if let Some(folder) = &opts.folder {
        files
            .add_parent(&id, folder)
            .map_err(|e| e.during("moving presentation to folder"))?;
    }

    let message = format!("Presentation created: {}", created.title);
    let mut result = CmdResult::default().with_message(CmdMessage::success(message));
    result.add_message(CmdMessage::info(format!("ID: {}", id)));
    if let Some(folder) = opts.folder {
        result.add_message(CmdMessage::info(format!("Folder: {}", folder)));
    }
    Ok(result.with_created_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::memory::{InMemoryDocuments, InMemoryFiles};

    #[test]
    fn creates_and_files_into_folder() {
        let mut docs = InMemoryDocuments::new();
        let mut files = InMemoryFiles::new();
        let result = create(
            &mut docs,
            &mut files,
            CreatePresentation {
                title: "Quarterly".into(),
                folder: Some("folder-1".into()),
            },
        )
        .unwrap();

        let id = result.created_id.unwrap();
        assert_eq!(docs.presentation(&id).unwrap().title, "Quarterly");
        assert_eq!(files.parents(), &[(id.clone(), "folder-1".to_string())]);
        let created = &result.messages[0].content;
        assert_eq!(created, "Presentation created: Quarterly");
        assert_eq!(result.messages[1].content, format!("ID: {}", id));
    }

    #[test]
    fn no_folder_means_no_file_call() {
        let mut docs = InMemoryDocuments::new();
        let mut files = InMemoryFiles::new();
        create(
            &mut docs,
            &mut files,
            CreatePresentation {
                title: "Draft".into(),
                folder: None,
            },
        )
        .unwrap();
        assert!(files.parents().is_empty());
    }
}
