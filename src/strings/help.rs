//! # Help Text
//!
//! Displayed to the user via the `/help` command.

pub const MAIN: &str = concat!(
    "**📖 Almanac Help**\n",
    "\n",
    "**Dictionary**\n",
    "* /en_word _word_: Definitions, examples and pronunciation\n",
    "\n",
    "**🌤 Weather**\n",
    "* /weather current, _location_\n",
    "* /weather forecast, _location_, _days (1-14)_\n",
    "\n",
    "**⚡ Misc**\n",
    "* /start: Register and say hello\n",
    "* /get_id: Show your user and chat id\n",
    "* /custom: Coming soon\n",
    "* /help\n"
);
