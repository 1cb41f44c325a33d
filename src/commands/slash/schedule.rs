//! # Schedule Commands
//!
//! `/scadd`, `/sclist`, `/scedit`, `/scsitu` definitions.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add /scsitu status picker
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::backend::ScheduleField;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_add_command(),
        create_list_command(),
        create_edit_command(),
        create_status_command(),
    ]
}

fn create_add_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("scadd")
        .description("新しい予定をスプレッドシートに追加します。")
        .create_option(|option| {
            option
                .name("title")
                .description("予定のタイトル (必須)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("shoot_date")
                .description("撮影日 (例: 2025/10/01)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("due_date")
                .description("提出期限 (例: 2025/10/10)")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .create_option(|option| {
            option
                .name("file_url")
                .description("ギガファイル便などのURL")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .create_option(|option| {
            option
                .name("yt_url")
                .description("YouTube動画のURL")
                .kind(CommandOptionType::String)
                .required(false)
        });
    command
}

fn create_list_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("sclist")
        .description("登録されている予定の一覧を表示します。");
    command
}

fn create_edit_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("scedit")
        .description("指定したIDの予定の任意の項目を編集します。")
        .create_option(|option| {
            option
                .name("schedule_id")
                .description("編集したい予定のID")
                .kind(CommandOptionType::Integer)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("field")
                .description("編集したい項目名")
                .kind(CommandOptionType::String)
                .required(true);
            for field in ScheduleField::EDITABLE {
                option.add_string_choice(field.sheet_label(), field.sheet_label());
            }
            option
        })
        .create_option(|option| {
            option
                .name("new_value")
                .description("新しい値")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

fn create_status_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("scsitu")
        .description("指定したIDの予定の提出状況をプルダウンで変更します。")
        .create_option(|option| {
            option
                .name("schedule_id")
                .description("変更したい予定のID")
                .kind(CommandOptionType::Integer)
                .required(true)
        });
    command
}
