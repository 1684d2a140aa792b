mod algorithm;
mod analysis;
mod io;
