mod analyzer;
mod helpers;
mod popup;
mod popup_timers;
