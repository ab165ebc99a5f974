use pskl::{Error, SkipList};

fn main() {
  let mut list = SkipList::new(4, 0.5);

  list.insert(3, "a");
  list.insert(1, "b");
  list.insert(2, "c");

  assert_eq!(list.get(2), Ok(&"c"));
  assert_eq!(list.get(5), Err(Error::KeyNotFound(5)));

  assert_eq!(list.remove(1), Ok("b"));
  match list.get(1) {
    Ok(v) => println!("unexpected value {v}"),
    Err(e) => println!("{e}"),
  }

  println!("{list:#?}");
}
