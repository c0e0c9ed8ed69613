#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::ChartKind;
use super::FileInfo;
use super::MediaDraft;
use super::MediaKind;
use super::Position;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_attach()
            || cmd.is_clear()
            || cmd.is_select()
            || cmd.is_annotate()
            || cmd.is_note()
            || cmd.is_unnote()
            || cmd.is_cancel()
            || cmd.is_csv()
            || cmd.is_dump()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_attach(&self) -> bool {
        return ["/a", "/attach"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/clear"].contains(&self.command.as_str());
    }

    pub fn is_select(&self) -> bool {
        return ["/s", "/select"].contains(&self.command.as_str());
    }

    pub fn is_annotate(&self) -> bool {
        return ["/an", "/annotate"].contains(&self.command.as_str());
    }

    pub fn is_note(&self) -> bool {
        return ["/n", "/note"].contains(&self.command.as_str());
    }

    pub fn is_unnote(&self) -> bool {
        return ["/un", "/unnote"].contains(&self.command.as_str());
    }

    pub fn is_cancel(&self) -> bool {
        return ["/cancel"].contains(&self.command.as_str());
    }

    pub fn is_csv(&self) -> bool {
        return ["/csv"].contains(&self.command.as_str());
    }

    pub fn is_dump(&self) -> bool {
        return ["/dump"].contains(&self.command.as_str());
    }

    fn rest(&self, skip: usize) -> String {
        return self
            .args
            .iter()
            .skip(skip)
            .cloned()
            .collect::<Vec<String>>()
            .join(" ");
    }

    /// Builds a media draft from `/attach KIND ARGS`.
    pub fn media_draft(&self) -> Result<MediaDraft> {
        if self.args.len() < 2 {
            bail!("Usage: /attach KIND ARGS. Run `/help` for more details.");
        }

        let kind_str = &self.args[0];
        let kind = match MediaKind::parse(kind_str) {
            Some(kind) => kind,
            None => bail!(format!("{kind_str} is not a media kind.")),
        };

        let first = self.args[1].as_str();
        let draft = match kind {
            MediaKind::Text => MediaDraft::text(&self.rest(1)),
            MediaKind::Code => {
                if self.args.len() < 3 {
                    bail!("Usage: /attach code LANGUAGE SOURCE");
                }
                MediaDraft::code(&self.rest(2), Some(first))
            }
            MediaKind::Image => {
                let alt = self.rest(2);
                if alt.is_empty() {
                    MediaDraft::image(first, None)
                } else {
                    MediaDraft::image(first, Some(&alt))
                }
            }
            MediaKind::Audio => MediaDraft::audio(first, None),
            MediaKind::Video => MediaDraft::video(first, None),
            MediaKind::Document => MediaDraft::document(&self.rest(2), Some(FileInfo::new(first))),
            MediaKind::Spreadsheet => {
                let chart = match ChartKind::parse(first) {
                    Some(chart) => chart,
                    None => bail!(format!("{first} is not a chart kind.")),
                };
                MediaDraft::spreadsheet(&self.rest(2), chart, None)
            }
        };

        return Ok(draft);
    }

    /// Parses `/note MEDIA_ID X Y TEXT`.
    pub fn annotation(&self) -> Result<(String, Position, String)> {
        if self.args.len() < 4 {
            bail!("Usage: /note MEDIA_ID X Y TEXT");
        }

        let x = self.args[1].parse::<f64>()?;
        let y = self.args[2].parse::<f64>()?;

        return Ok((self.args[0].to_string(), Position::new(x, y), self.rest(3)));
    }
}
