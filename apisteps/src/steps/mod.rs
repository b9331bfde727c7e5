mod assertion;
mod debug;
mod request;
mod storage;
