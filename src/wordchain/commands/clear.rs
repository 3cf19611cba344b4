use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::UserContext;
use crate::store::VocabularyRepository;

pub fn run<R: VocabularyRepository>(repo: &mut R, user: &UserContext) -> Result<CmdResult> {
    let count = repo.read_all(user)?.len();
    repo.clear(user)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} entries and reset settings",
        count
    )));
    Ok(result)
}
