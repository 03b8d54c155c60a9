pub(crate) const APP_TITLE: &str = "GSM | GSocket Manager";
pub(crate) const HELP_TEXT: &str =
    "↑/↓ nav • q quit • / filter • e edit • d del • a add • Enter exec";
pub(crate) const FILTER_HELP_TEXT: &str = "esc clear • enter select";

pub(crate) const LABEL_WIDTH: usize = 5;
pub(crate) const KEY_PREVIEW_LEN: usize = 20;

pub(crate) const LIST_WIDTH_PERCENT: u16 = 40;
pub(crate) const LIST_MIN_WIDTH: u16 = 30;
pub(crate) const DETAIL_MIN_WIDTH: u16 = 25;
pub(crate) const TWO_COLUMN_MIN_WIDTH: u16 = 50;

pub(crate) const TITLE_HEIGHT: u16 = 1;
pub(crate) const STATUS_HEIGHT: u16 = 1;
pub(crate) const FOOTER_HEIGHT: u16 = 1;

pub(crate) const MODAL_WIDTH_PERCENT: u16 = 70;
pub(crate) const MODAL_MIN_WIDTH: u16 = 30;
pub(crate) const CONFIRM_WIDTH_PERCENT: u16 = 50;

pub(crate) const POPUP_MIN_WIDTH: u16 = 10;
pub(crate) const POPUP_MIN_HEIGHT: u16 = 5;

pub(crate) const RECENT_DAYS: i64 = 7;
