pub mod efficiency;

mod axes_draw;
