mod cipher;
mod names;
mod rename;
