mod cards;
pub(crate) mod charts;
mod evidence;
mod html;
mod markdown;
mod page;
mod run;
pub(crate) mod selection;
mod tables;


pub(crate) use run::run;
