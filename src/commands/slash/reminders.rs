//! # Reminder Settings Command
//!
//! `/screm days channel`
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::channel::ChannelType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_reminder_settings_command()]
}

fn create_reminder_settings_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("screm")
        .description("提出期限前の通知日数とチャンネルを設定します。")
        .create_option(|option| {
            option
                .name("days")
                .description("提出日の何日前に通知するか (例: 2)")
                .kind(CommandOptionType::Integer)
                .min_int_value(1)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("channel")
                .description("通知メッセージを送信するチャンネル")
                .kind(CommandOptionType::Channel)
                .channel_types(&[ChannelType::Text])
                .required(true)
        });
    command
}
