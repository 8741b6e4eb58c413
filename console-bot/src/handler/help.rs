pub(crate) const SHORT_HELP: &str = "I roll dice for dnd";

pub(crate) const LONG_HELP: &str = "!roll <dice> <description> - roll dice
/roll can be used instead of !roll. !r and /r also work.

Dice throws, can be added/subtracted to each other:
XdY - Throw X Y-sided dice. X defaults to 1.
XadY - Throw X Y-sided dice with advantage. X defaults to 2.
XddY - Throw X Y-sided dice with disadvantage. X defaults to 2.
X - Constant number

Example throws:
!roll d20
/roll ad20 + 5 damage
!r 2d20-d10+10";
